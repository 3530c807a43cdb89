use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, instrument, warn};

use crate::api::routes::AppState;
use crate::entities::common::{
    ApiResponse, DependencyStatus, HealthStatus, HealthStatusEnvelope, MetricsEnvelope, MetricsStatus,
};

/// Liveness probe; touches no dependency
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthStatusEnvelope)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthStatus>> {
    debug!("Health check requested");
    Json(ApiResponse::ok(
        "Service is healthy",
        HealthStatus {
            status: "healthy".to_string(),
        },
    ))
}

/// Dependency report; a down database is reported in the body, not as a failure
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Dependency status", body = MetricsEnvelope)
    ),
    tag = "health"
)]
#[instrument(skip(service))]
pub async fn metrics(State(service): State<AppState>) -> Json<ApiResponse<MetricsStatus>> {
    let database = match service.check_store().await {
        Ok(()) => "connected",
        Err(e) => {
            warn!("Database check failed: {}", e);
            "disconnected"
        }
    };

    Json(ApiResponse::ok(
        "Metrics retrieved successfully",
        MetricsStatus {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            database: DependencyStatus {
                status: database.to_string(),
            },
        },
    ))
}
