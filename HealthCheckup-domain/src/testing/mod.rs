// Testing utilities for the domain layer
// This module is only available when the "mock" feature is enabled

pub use health_checkup_data::repository::InMemoryHealthRecordRepository;

use crate::services::health_record::HealthRecordService;

/// Record service over the in-memory repository, for handler tests
pub type MockHealthRecordService = HealthRecordService<InMemoryHealthRecordRepository>;

/// Service over an empty in-memory repository
pub fn create_mock_health_record_service() -> MockHealthRecordService {
    HealthRecordService::new(InMemoryHealthRecordRepository::new())
}

/// Service whose repository fails every call, for exercising error paths
pub fn create_failing_health_record_service() -> MockHealthRecordService {
    HealthRecordService::new(InMemoryHealthRecordRepository::failing())
}
