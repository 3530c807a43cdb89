use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_checkup_data::models::health_record::format_timestamp;
use health_checkup_domain::entities::health_record::{
    HealthRecord as DomainHealthRecord, HealthRecordRequest as DomainHealthRecordRequest,
};

/// Request payload for creating or replacing a health record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRecordRequest {
    /// Name of the person examined (1-100 characters)
    #[schema(example = "Kim")]
    pub user_name: String,

    /// Outcome or status of the checkup (1-50 characters)
    #[schema(example = "normal")]
    pub health_status: String,

    /// Checkup date, defaults to today (UTC) on create
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-01")]
    pub check_date: Option<NaiveDate>,

    /// Kind of exam, defaults to "regular checkup" on create
    pub exam_type: Option<String>,

    /// Height in centimetres
    pub height: Option<f64>,

    /// Weight in kilograms
    pub weight: Option<f64>,

    /// Blood pressure, e.g. "120/80"
    pub blood_pressure: Option<String>,

    /// Blood sugar in mg/dL
    pub blood_sugar: Option<i32>,
}

/// Public representation of a health record
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthRecordResponse {
    pub id: i64,
    pub user_name: String,
    pub health_status: String,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub check_date: NaiveDate,

    pub exam_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<i32>,

    /// Creation time, `YYYY-MM-DDTHH:MM:SS.ffffffZ`
    #[schema(example = "2024-01-01T00:00:00.000000Z")]
    pub created_at: String,

    /// Last write time, same format as `created_at`
    #[schema(example = "2024-01-01T00:00:00.000000Z")]
    pub updated_at: String,
}

impl From<HealthRecordRequest> for DomainHealthRecordRequest {
    fn from(request: HealthRecordRequest) -> Self {
        DomainHealthRecordRequest {
            user_name: request.user_name,
            health_status: request.health_status,
            check_date: request.check_date,
            exam_type: request.exam_type,
            height: request.height,
            weight: request.weight,
            blood_pressure: request.blood_pressure,
            blood_sugar: request.blood_sugar,
        }
    }
}

impl From<DomainHealthRecord> for HealthRecordResponse {
    fn from(record: DomainHealthRecord) -> Self {
        HealthRecordResponse {
            id: record.id,
            user_name: record.user_name,
            health_status: record.health_status,
            check_date: record.check_date,
            exam_type: record.exam_type,
            height: record.height,
            weight: record.weight,
            blood_pressure: record.blood_pressure,
            blood_sugar: record.blood_sugar,
            created_at: format_timestamp(&record.created_at),
            updated_at: format_timestamp(&record.updated_at),
        }
    }
}
