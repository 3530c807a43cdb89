// Public entities for the HealthCheckup API
// This module contains data structures that are shared across the application boundary

// Health record request and response bodies
pub mod health_record;

// Common entities for the response envelope, paging, probes
pub mod common;

pub use common::{ApiResponse, ErrorResponse, ListParams};
pub use health_record::{HealthRecordRequest, HealthRecordResponse};
