use crate::{handler, model};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        handler::determinants_handler,
        handler::solve_handler,
        handler::save_matrix_handler,
        handler::load_matrix_handler,
        handler::list_matrices_handler,
    ),
    components(
        schemas(
            model::SystemRequest,
            model::NamedValue,
            model::DeterminantsResponse,
            model::SolveStatus,
            model::StepResponse,
            model::SolveResponse,
            model::SavedMatrixResponse,
            model::ErrorResponse
        )
    ),
    tags(
        (name = "Cramer Webservice", description = "Solve 2x2 to 4x4 linear systems with Cramer's rule and keep named matrices")
    ),
    info(
        title = "Cramer Webservice API",
        version = "0.1.0",
        description = "An API for computing determinants, solving linear systems step by step and saving named matrices.",
        license(
            name = "MIT/Apache-2.0",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
