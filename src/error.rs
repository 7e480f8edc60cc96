use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ports::RepositoryError;
use crate::validation::ValidationError;

pub const TRANSACTION_NOT_FOUND: &str = "Transaction not found";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", ValidationError::MissingFields)]
    MissingFields,

    #[error("{}", ValidationError::NonPositiveValue)]
    NonPositiveValue,

    #[error("{}", ValidationError::FutureTransaction)]
    FutureTransaction,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Transaction {0} already exists")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields | AppError::NonPositiveValue | AppError::FutureTransaction => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn transaction_not_found() -> Self {
        AppError::NotFound(TRANSACTION_NOT_FOUND.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingFields => AppError::MissingFields,
            ValidationError::NonPositiveValue => AppError::NonPositiveValue,
            ValidationError::FutureTransaction => AppError::FutureTransaction,
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(id) => AppError::Conflict(id),
            other => {
                tracing::error!(error = %other, "Transaction store failure");
                AppError::Database(other.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "message": self.to_string(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
