use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::health_record::HealthRecordResponse;

/// Uniform wrapper around every response body
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    HealthRecordEnvelope = ApiResponse<HealthRecordResponse>,
    HealthRecordListEnvelope = ApiResponse<Vec<HealthRecordResponse>>,
    DeletedRecordEnvelope = ApiResponse<DeletedRecord>,
    HealthStatusEnvelope = ApiResponse<HealthStatus>,
    MetricsEnvelope = ApiResponse<MetricsStatus>
)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,

    /// Human-readable outcome
    pub message: String,

    /// Payload, `null` on failure
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Failure envelope; `data` is always `null`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// What went wrong
    pub message: String,

    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Query parameters for listing records
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Number of records to skip (default: 0)
    pub skip: Option<u64>,

    /// Maximum number of records to return (default: 100)
    pub limit: Option<u64>,
}

/// Body returned after a delete
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedRecord {
    /// ID of the deleted record
    pub id: i64,
}

/// Liveness probe body
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    /// Always "healthy" while the process serves requests
    pub status: String,
}

/// Dependency report body
#[derive(Debug, Serialize, ToSchema)]
pub struct MetricsStatus {
    /// Always "ok" while the process serves requests
    pub status: String,

    /// When the probe ran (RFC 3339)
    pub timestamp: String,

    /// Database reachability
    pub database: DependencyStatus,
}

/// Status of one dependency
#[derive(Debug, Serialize, ToSchema)]
pub struct DependencyStatus {
    /// "connected" or "disconnected"
    pub status: String,
}
