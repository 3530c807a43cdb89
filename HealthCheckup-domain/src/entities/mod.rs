// Domain entities and value objects
pub mod conversions;
pub mod health_record;

// Re-export common types for easier imports
pub use health_record::{HealthRecord, HealthRecordRequest, DEFAULT_EXAM_TYPE};
