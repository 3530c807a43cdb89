use chrono::NaiveDate;
use health_checkup_data::models::{HealthRecordChanges, NewHealthRecord, StoredHealthRecord};

use crate::entities::health_record::{HealthRecord, HealthRecordRequest, DEFAULT_EXAM_TYPE};

// Conversion functions between domain entities and data models
// These follow the pattern convert_to_[target_layer]_[model_name]

/// Convert from data model to domain entity
pub fn convert_to_domain_record(stored: StoredHealthRecord) -> HealthRecord {
    HealthRecord {
        id: stored.id,
        user_name: stored.user_name,
        health_status: stored.health_status,
        check_date: stored.check_date,
        exam_type: stored.exam_type,
        height: stored.height,
        weight: stored.weight,
        blood_pressure: stored.blood_pressure,
        blood_sugar: stored.blood_sugar,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    }
}

/// Convert a create request to an insertable row, applying the defaults
pub fn convert_to_data_new_record(request: HealthRecordRequest, today: NaiveDate) -> NewHealthRecord {
    NewHealthRecord {
        user_name: request.user_name,
        health_status: request.health_status,
        check_date: request.check_date.unwrap_or(today),
        exam_type: request
            .exam_type
            .unwrap_or_else(|| DEFAULT_EXAM_TYPE.to_string()),
        height: request.height,
        weight: request.weight,
        blood_pressure: request.blood_pressure,
        blood_sugar: request.blood_sugar,
    }
}

/// Convert an update request to the store's change set
pub fn convert_to_data_changes(request: HealthRecordRequest) -> HealthRecordChanges {
    HealthRecordChanges {
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
