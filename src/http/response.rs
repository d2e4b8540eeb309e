//! Error responses.
//!
//! # Responsibilities
//! - Map handler failures to HTTP status codes
//! - Write every failure as `{ "error": <message> }`
//!
//! # Design Decisions
//! - One error type is the single response-writing path for all handlers
//! - Store errors surface their message unchanged (no sanitization)

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::validation::MissingFields;
use crate::store::StoreError;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or unusable.
    #[error("{0}")]
    Validation(String),

    /// No row has the requested id.
    #[error("{0}")]
    NotFound(String),

    /// The store rejected the statement.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The body could not be read or parsed.
    #[error("{message}")]
    Payload { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Payload { status, .. } => *status,
        }
    }
}

impl From<MissingFields> for ApiError {
    fn from(missing: MissingFields) -> Self {
        ApiError::Validation(missing.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Payload {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Store(e) => tracing::error!(error = %e, "Store operation failed"),
            other => tracing::debug!(status = %status, error = %other, "Request rejected"),
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
