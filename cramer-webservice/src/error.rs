use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cramer_core::CramerCoreError;
use cramer_rs::{CramerError, StoreError};
use thiserror::Error;
use validator::ValidationErrors;

use crate::model::ErrorResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Input validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Matrix error: {0}")]
    Matrix(#[from] CramerCoreError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<CramerError> for AppError {
    fn from(err: CramerError) -> Self {
        match err {
            CramerError::CramerCoreError(err) => AppError::Matrix(err),
            CramerError::Store(err) => AppError::Store(err),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Matrix(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::BlankName) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Corrupt { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(StoreError::Storage { .. }) => StatusCode::INSUFFICIENT_STORAGE,
            AppError::Store(StoreError::Backend(_)) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, error_message, details) = match self {
            AppError::Validation(err) => {
                let messages: Vec<String> = err
                    .field_errors()
                    .into_iter()
                    .flat_map(|(_, errors)| errors.iter().map(|e| e.to_string()))
                    .collect();
                (
                    "Validation Error".to_string(),
                    "One or more input fields failed validation.".to_string(),
                    Some(messages),
                )
            }
            AppError::Matrix(err) if err.is_validation() => {
                ("Validation Error".to_string(), err.to_string(), None)
            }
            AppError::Matrix(err) => ("Matrix Error".to_string(), err.to_string(), None),
            AppError::Store(err) => ("Storage Error".to_string(), err.to_string(), None),
            AppError::Internal(err_msg) => ("Internal Server Error".to_string(), err_msg, None),
        };

        if status.is_server_error() {
            tracing::error!("{}: {}", error_type, error_message);
        } else {
            tracing::warn!("{}: {}", error_type, error_message);
        }

        let body = Json(ErrorResponse {
            status_code: status.as_u16(),
            error: error_type,
            message: error_message,
            details,
        });

        (status, body).into_response()
    }
}
