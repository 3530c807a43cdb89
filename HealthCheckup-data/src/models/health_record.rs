use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Storage format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage model for a health checkup record, one row of `health_records`
#[derive(Debug, Clone, PartialEq)]
pub struct StoredHealthRecord {
    /// Auto-incremented primary key
    pub id: i64,

    /// Name of the person examined
    pub user_name: String,

    /// Outcome or status of the checkup
    pub health_status: String,

    /// Date the checkup took place
    pub check_date: NaiveDate,

    /// Kind of exam
    pub exam_type: String,

    /// Height in centimetres
    pub height: Option<f64>,

    /// Weight in kilograms
    pub weight: Option<f64>,

    /// Blood pressure as written, e.g. "120/80"
    pub blood_pressure: Option<String>,

    /// Blood sugar in mg/dL
    pub blood_sugar: Option<i32>,

    /// Set once at insert
    pub created_at: DateTime<Utc>,

    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

/// Input data for inserting a new record; id and timestamps are assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewHealthRecord {
    pub user_name: String,
    pub health_status: String,
    pub check_date: NaiveDate,
    pub exam_type: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub blood_pressure: Option<String>,
    pub blood_sugar: Option<i32>,
}

/// Replacement values for an existing record
///
/// Required columns are always overwritten. `None` on an optional column keeps
/// the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthRecordChanges {
    pub user_name: String,
    pub health_status: String,
    pub check_date: Option<NaiveDate>,
    pub exam_type: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub blood_pressure: Option<String>,
    pub blood_sugar: Option<i32>,
}

impl StoredHealthRecord {
    /// Apply `changes` the same way the SQL update does
    pub fn apply(&mut self, changes: HealthRecordChanges, updated_at: DateTime<Utc>) {
        self.user_name = changes.user_name;
        self.health_status = changes.health_status;
        if let Some(check_date) = changes.check_date {
            self.check_date = check_date;
        }
        if let Some(exam_type) = changes.exam_type {
            self.exam_type = exam_type;
        }
        if changes.height.is_some() {
            self.height = changes.height;
        }
        if changes.weight.is_some() {
            self.weight = changes.weight;
        }
        if changes.blood_pressure.is_some() {
            self.blood_pressure = changes.blood_pressure;
        }
        if changes.blood_sugar.is_some() {
            self.blood_sugar = changes.blood_sugar;
        }
        self.updated_at = updated_at;
    }
}

/// Encode a timestamp as fixed-width RFC 3339 text (microseconds, `Z` suffix)
///
/// The fixed width keeps lexical order equal to chronological order in SQL.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a timestamp written by [`format_timestamp`]
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp {:?}: {}", value, e))
}

/// Decode a calendar date stored as `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("invalid date {:?}: {}", value, e))
}

/// Current time truncated to the stored (microsecond) precision
pub fn now_micros() -> DateTime<Utc> {
    let now = Utc::now();
    // Round-trip through the storage format so in-memory and stored values compare equal
    parse_timestamp(&format_timestamp(&now)).unwrap_or(now)
}
