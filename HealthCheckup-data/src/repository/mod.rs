// Repository module structure
pub mod errors;
mod health_record;
mod storage;

#[cfg(any(test, feature = "mock"))]
mod in_memory;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use health_record::{HealthRecordRepositoryTrait, SqliteHealthRecordRepository};

#[cfg(any(test, feature = "mock"))]
pub use in_memory::InMemoryHealthRecordRepository;
