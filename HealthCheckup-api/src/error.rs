use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use health_checkup_domain::services::HealthRecordServiceError;

use crate::entities::ErrorResponse;

/// Message sent to clients when storage fails; internals stay in the logs
pub const PERSISTENCE_FAILURE_MESSAGE: &str = "A storage error occurred while processing the request";

/// Errors surfaced by the HTTP layer, each mapped to one status code
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid input
    #[error("{0}")]
    Validation(String),

    /// No resource at the requested location
    #[error("{0}")]
    NotFound(String),

    /// The path exists but not for this method
    #[error("{0}")]
    MethodNotAllowed(String),

    /// The store failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Anything else
    #[error("Internal Server Error")]
    Unexpected(String),
}

impl ApiError {
    /// Not-found error for a record id
    pub fn record_not_found(id: i64) -> Self {
        ApiError::NotFound(format!("Health record {} not found", id))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Persistence(_) | ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HealthRecordServiceError> for ApiError {
    fn from(err: HealthRecordServiceError) -> Self {
        match err {
            HealthRecordServiceError::Validation(msg) => ApiError::Validation(msg),
            HealthRecordServiceError::Persistence(msg) => ApiError::Persistence(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Validation(msg) => {
                warn!("Rejected request: {}", msg);
                msg.clone()
            }
            ApiError::NotFound(msg) | ApiError::MethodNotAllowed(msg) => msg.clone(),
            ApiError::Persistence(detail) => {
                error!("Storage failure: {}", detail);
                PERSISTENCE_FAILURE_MESSAGE.to_string()
            }
            ApiError::Unexpected(detail) => {
                error!("Unexpected failure: {}", detail);
                self.to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
