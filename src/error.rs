use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures reported by a [`UserStore`](crate::services::store::UserStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A find-and-modify matched no document.
    #[error("no documents in result")]
    NotFound,

    #[error("{0}")]
    Backend(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unparseable `size` path segment. Rendered as a bare JSON string.
    #[error("{0}")]
    InvalidSize(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{message}")]
    NotFound { message: String, status: StatusCode },

    #[error("{0}")]
    StoreFailure(String),
}

impl ApiError {
    /// Maps a store error, reporting misses with `not_found_status`.
    pub fn from_store(err: StoreError, not_found_status: StatusCode) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound {
                message: StoreError::NotFound.to_string(),
                status: not_found_status,
            },
            StoreError::Backend(message) => ApiError::StoreFailure(message),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidSize(_) | ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { status, .. } => *status,
            ApiError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            ApiError::InvalidSize(message) => builder.json(message),
            _ => builder.json(json!({ "ERROR": self.to_string() })),
        }
    }
}
