use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Exam type stored when a request does not name one
pub const DEFAULT_EXAM_TYPE: &str = "regular checkup";

/// Domain model for a health checkup record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Server-assigned identifier
    pub id: i64,

    /// Name of the person examined
    pub user_name: String,

    /// Outcome or status of the checkup
    pub health_status: String,

    /// Date the checkup took place
    pub check_date: NaiveDate,

    /// Kind of exam
    pub exam_type: String,

    /// Height in centimetres, two fractional digits
    pub height: Option<f64>,

    /// Weight in kilograms, two fractional digits
    pub weight: Option<f64>,

    /// Blood pressure as written, e.g. "120/80"
    pub blood_pressure: Option<String>,

    /// Blood sugar in mg/dL
    pub blood_sugar: Option<i32>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields of a health record, used for both create and update
///
/// On create, omitted `check_date` and `exam_type` take their defaults. On
/// update, every omitted optional field keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct HealthRecordRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub user_name: String,

    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub health_status: String,

    pub check_date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub exam_type: Option<String>,

    #[validate(range(min = 0.01, max = 300.0, message = "must be between 0.01 and 300 cm"))]
    pub height: Option<f64>,

    #[validate(range(min = 0.01, max = 500.0, message = "must be between 0.01 and 500 kg"))]
    pub weight: Option<f64>,

    #[validate(length(min = 1, max = 20, message = "must be between 1 and 20 characters"))]
    pub blood_pressure: Option<String>,

    #[validate(range(min = 0, max = 1000, message = "must be between 0 and 1000"))]
    pub blood_sugar: Option<i32>,
}

impl HealthRecordRequest {
    /// Shorthand for a request carrying only the required fields
    pub fn new(user_name: impl Into<String>, health_status: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            health_status: health_status.into(),
            ..Self::default()
        }
    }

    /// Trim text fields and round measurements to two fractional digits
    pub fn normalized(self) -> Self {
        Self {
            user_name: self.user_name.trim().to_string(),
            health_status: self.health_status.trim().to_string(),
            check_date: self.check_date,
            exam_type: self.exam_type.map(|s| s.trim().to_string()),
            height: self.height.map(round_two_places),
            weight: self.weight.map(round_two_places),
            blood_pressure: self.blood_pressure.map(|s| s.trim().to_string()),
            blood_sugar: self.blood_sugar,
        }
    }
}

/// Round to the stored precision of two fractional digits
pub fn round_two_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
