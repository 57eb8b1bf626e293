use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod error;
mod handler;
mod model;
mod openapi;

use crate::handler::AppState;
use crate::openapi::ApiDoc;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(health_check))
        .route("/determinants", post(handler::determinants_handler))
        .route("/solve", post(handler::solve_handler))
        .route("/matrices", get(handler::list_matrices_handler))
        .route(
            "/matrices/{name}",
            get(handler::load_matrix_handler).put(handler::save_matrix_handler),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn listen_addr() -> SocketAddr {
    let raw = std::env::var("CRAMER_WEBSERVICE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    match raw.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::warn!("Ignoring CRAMER_WEBSERVICE_ADDR={:?} ({}), using {}", raw, e, DEFAULT_ADDR);
            SocketAddr::from(([0, 0, 0, 0], 3000))
        }
    }
}

#[tokio::main]
async fn main() {
    // Fallback to "info" level if RUST_LOG is not set.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cramer_webservice=debug,cramer_rs=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();

    // `init()` may already have installed the log bridge.
    if let Err(e) = tracing_log::LogTracer::init() {
        tracing::debug!("log bridge not installed: {}", e);
    }

    tracing::info!("Tracing initialized. Starting Cramer webservice...");

    let app = app(AppState::default());

    let addr = listen_addr();
    tracing::info!("Listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
pub async fn health_check() -> &'static str {
    tracing::info!("Health check endpoint hit");
    "Cramer Webservice is running!"
}
