use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::*;
use crate::models::MessageResponse;

/// Failures reported by an `ExpenseStore` backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid expense id `{0}`")]
    InvalidId(String),
    #[error("expense not found")]
    NotFound,
    #[error("database error: {0}")]
    Backend(#[from] libsql::Error),
    #[error("corrupt expense row: {0}")]
    CorruptRow(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{}", ERR_EXPENSE_NOT_FOUND)]
    NotFound,
    #[error("{}: {}", ERR_STORE_UNAVAILABLE, .0)]
    Unavailable(String),
}

impl ServiceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ServiceError::InvalidInput(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            // Malformed ids are indistinguishable from missing ones to callers.
            StoreError::InvalidId(_) | StoreError::NotFound => ServiceError::NotFound,
            other => {
                tracing::error!(error = %other, "expense store failure");
                ServiceError::Unavailable(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status(), Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
