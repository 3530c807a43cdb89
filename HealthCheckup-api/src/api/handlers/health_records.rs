use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::StatusCode,
};
use tracing::{info, instrument};

use health_checkup_domain::services::DEFAULT_LIST_LIMIT;

use crate::api::routes::AppState;
use crate::entities::common::{
    ApiResponse, DeletedRecord, DeletedRecordEnvelope, ErrorResponse, HealthRecordEnvelope,
    HealthRecordListEnvelope, ListParams,
};
use crate::entities::health_record::{HealthRecordRequest, HealthRecordResponse};
use crate::error::ApiError;

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

fn record_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

fn request_body(body: Result<Json<HealthRecordRequest>, JsonRejection>) -> Result<HealthRecordRequest, ApiError> {
    body.map(|Json(request)| request)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// List health records, newest first
#[utoipa::path(
    get,
    path = "/health-records",
    params(ListParams),
    responses(
        (status = 200, description = "Health records retrieved", body = HealthRecordListEnvelope),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "health_records"
)]
#[instrument(skip(service))]
pub async fn list_health_records(
    State(service): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<HealthRecordResponse>> {
    let Query(params) = params.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let records = service.list(skip, limit).await?;
    let records: Vec<HealthRecordResponse> = records.into_iter().map(Into::into).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Health records retrieved successfully", records)),
    ))
}

/// Get a single health record by ID
#[utoipa::path(
    get,
    path = "/health-records/{id}",
    params(
        ("id" = i64, Path, description = "Health record ID")
    ),
    responses(
        (status = 200, description = "Health record found", body = HealthRecordEnvelope),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Health record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "health_records"
)]
#[instrument(skip(service))]
pub async fn get_health_record(
    State(service): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<HealthRecordResponse> {
    let id = record_id(path)?;

    match service.get(id).await? {
        Some(record) => Ok((
            StatusCode::OK,
            Json(ApiResponse::ok("Health record retrieved successfully", record.into())),
        )),
        None => {
            info!("Health record not found: {}", id);
            Err(ApiError::record_not_found(id))
        }
    }
}

/// Create a new health record
#[utoipa::path(
    post,
    path = "/health-records",
    request_body = HealthRecordRequest,
    responses(
        (status = 201, description = "Health record created", body = HealthRecordEnvelope),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "health_records"
)]
#[instrument(skip(service, body))]
pub async fn create_health_record(
    State(service): State<AppState>,
    body: Result<Json<HealthRecordRequest>, JsonRejection>,
) -> ApiResult<HealthRecordResponse> {
    let request = request_body(body)?;

    let record = service.create(request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Health record created successfully", record.into())),
    ))
}

/// Replace a health record's fields
///
/// Omitted optional fields keep their stored values.
#[utoipa::path(
    put,
    path = "/health-records/{id}",
    params(
        ("id" = i64, Path, description = "Health record ID")
    ),
    request_body = HealthRecordRequest,
    responses(
        (status = 200, description = "Health record updated", body = HealthRecordEnvelope),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Health record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "health_records"
)]
#[instrument(skip(service, body))]
pub async fn update_health_record(
    State(service): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<HealthRecordRequest>, JsonRejection>,
) -> ApiResult<HealthRecordResponse> {
    let id = record_id(path)?;
    let request = request_body(body)?;

    match service.update(id, request.into()).await? {
        Some(record) => Ok((
            StatusCode::OK,
            Json(ApiResponse::ok("Health record updated successfully", record.into())),
        )),
        None => Err(ApiError::record_not_found(id)),
    }
}

/// Delete a health record
#[utoipa::path(
    delete,
    path = "/health-records/{id}",
    params(
        ("id" = i64, Path, description = "Health record ID")
    ),
    responses(
        (status = 200, description = "Health record deleted", body = DeletedRecordEnvelope),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Health record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "health_records"
)]
#[instrument(skip(service))]
pub async fn delete_health_record(
    State(service): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<DeletedRecord> {
    let id = record_id(path)?;

    if service.delete(id).await? {
        Ok((
            StatusCode::OK,
            Json(ApiResponse::ok("Health record deleted successfully", DeletedRecord { id })),
        ))
    } else {
        Err(ApiError::record_not_found(id))
    }
}
