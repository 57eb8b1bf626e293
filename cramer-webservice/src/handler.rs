use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use cramer_core::CellPolicy;
use cramer_rs::{session::saved_names, store, MemoryStore, SavedMatrixRecord, Session};
use tokio::sync::Mutex;
use validator::Validate;

use crate::{
    error::AppError,
    model::{
        DeterminantsResponse, ErrorResponse, MatrixName, SavedMatrixResponse, SolveResponse,
        SystemRequest,
    },
};

/// One in-memory store shared by every request; last write wins.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<Mutex<MemoryStore>>,
}

/// Validates the request shape and loads its cells into a fresh session.
fn session_from(payload: SystemRequest) -> Result<Session, AppError> {
    payload.validate()?;
    let size = payload.matrix_size();
    let mut session = Session::new();
    if payload.strict {
        session.set_policy(CellPolicy::Strict);
    }
    session.set_cells(size, payload.cells)?;
    Ok(session)
}

fn checked_name(name: String) -> Result<String, AppError> {
    let name = MatrixName { name };
    name.validate()?;
    Ok(name.name)
}

#[utoipa::path(
    post,
    path = "/determinants",
    request_body = SystemRequest,
    responses(
        (status = 200, description = "Main determinant and one determinant per variable.", body = DeterminantsResponse),
        (status = 400, description = "Invalid request or blank cell.", body = ErrorResponse)
    ),
    tag = "Cramer Webservice"
)]
pub async fn determinants_handler(
    Json(payload): Json<SystemRequest>,
) -> Result<Json<DeterminantsResponse>, AppError> {
    tracing::info!(target: "cramer_webservice::handler", "Determinants requested for size {}", payload.size);
    let session = session_from(payload)?;
    let report = session.determinants()?;
    Ok(Json(report.into()))
}

#[utoipa::path(
    post,
    path = "/solve",
    request_body = SystemRequest,
    responses(
        (status = 200, description = "Cramer's rule outcome with the narrated steps.", body = SolveResponse),
        (status = 400, description = "Invalid request or blank cell.", body = ErrorResponse)
    ),
    tag = "Cramer Webservice"
)]
pub async fn solve_handler(
    Json(payload): Json<SystemRequest>,
) -> Result<Json<SolveResponse>, AppError> {
    tracing::info!(target: "cramer_webservice::handler", "Solve requested for size {}", payload.size);
    let session = session_from(payload)?;
    let report = session.solve()?;
    tracing::debug!(target: "cramer_webservice::handler", "Solve finished, unique: {}", report.outcome.is_unique());
    Ok(Json(report.into()))
}

#[utoipa::path(
    put,
    path = "/matrices/{name}",
    params(("name" = String, Path, description = "Name to save the matrix under")),
    request_body = SystemRequest,
    responses(
        (status = 200, description = "Matrix saved; blank or non-numeric cells are stored as 0.", body = SavedMatrixResponse),
        (status = 400, description = "Invalid request or name.", body = ErrorResponse),
        (status = 507, description = "The store refused the write.", body = ErrorResponse)
    ),
    tag = "Cramer Webservice"
)]
pub async fn save_matrix_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<SystemRequest>,
) -> Result<Json<SavedMatrixResponse>, AppError> {
    let name = checked_name(name)?;
    let session = session_from(payload)?;
    let record = SavedMatrixRecord::from_matrix(&session.parse_matrix()?);
    {
        let mut store = state.store.lock().await;
        store::save(&mut *store, &name, &record)?;
    }
    Ok(Json(SavedMatrixResponse::new(name, record)))
}

#[utoipa::path(
    get,
    path = "/matrices/{name}",
    params(("name" = String, Path, description = "Name of a saved matrix")),
    responses(
        (status = 200, description = "The saved matrix.", body = SavedMatrixResponse),
        (status = 404, description = "No matrix saved under that name.", body = ErrorResponse),
        (status = 422, description = "The stored record is corrupt.", body = ErrorResponse)
    ),
    tag = "Cramer Webservice"
)]
pub async fn load_matrix_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SavedMatrixResponse>, AppError> {
    let name = checked_name(name)?;
    let record = {
        let store = state.store.lock().await;
        store::load(&*store, &name)?
    };
    // Shape check only; a record that decodes but has the wrong rows is corrupt.
    let matrix = record.into_matrix(&name)?;
    Ok(Json(SavedMatrixResponse::new(
        name,
        SavedMatrixRecord::from_matrix(&matrix),
    )))
}

#[utoipa::path(
    get,
    path = "/matrices",
    responses(
        (status = 200, description = "Names of all saved matrices, sorted.", body = Vec<String>)
    ),
    tag = "Cramer Webservice"
)]
pub async fn list_matrices_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(saved_names(&*store)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(size: usize, cells: &[&str]) -> SystemRequest {
        SystemRequest {
            size,
            cells: cells.iter().map(|c| c.to_string()).collect(),
            strict: false,
        }
    }

    #[tokio::test]
    async fn test_solve_handler_unique() {
        let Json(response) = solve_handler(Json(request(2, &["2", "1", "10", "1", "-3", "5"])))
            .await
            .unwrap();
        let solution = response.solution.unwrap();
        assert!((solution[0].value - 5.0).abs() < 1e-9);
        assert!(solution[1].value.abs() < 1e-9);
        assert_eq!(response.steps.len(), 3);
    }

    #[tokio::test]
    async fn test_solve_handler_blank_cell() {
        let err = solve_handler(Json(request(2, &["2", "", "10", "1", "-3", "5"])))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Matrix(_)));
    }

    #[tokio::test]
    async fn test_strict_request_rejects_text() {
        let mut payload = request(2, &["2", "abc", "10", "1", "-3", "5"]);
        assert!(determinants_handler(Json(payload.clone())).await.is_ok());
        payload.strict = true;
        assert!(determinants_handler(Json(payload)).await.is_err());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let state = AppState::default();
        let Json(saved) = save_matrix_handler(
            State(state.clone()),
            Path("mine".to_string()),
            Json(request(2, &["1", "", "3", "4", "x", "6"])),
        )
        .await
        .unwrap();
        assert_eq!(saved.matrix, vec![vec![1.0, 0.0, 3.0], vec![4.0, 0.0, 6.0]]);

        let Json(loaded) = load_matrix_handler(State(state.clone()), Path("mine".to_string()))
            .await
            .unwrap();
        assert_eq!(loaded.size, 2);
        assert_eq!(loaded.matrix, saved.matrix);

        let Json(names) = list_matrices_handler(State(state)).await.unwrap();
        assert_eq!(names, vec!["mine".to_string()]);
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let err = load_matrix_handler(State(AppState::default()), Path("nope".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store(cramer_rs::StoreError::NotFound(_))));
    }
}
