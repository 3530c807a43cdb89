// HealthCheckup Domain
// This crate contains the business logic for the health checkup records service

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Re-export the database module from the data crate for convenience
pub use health_checkup_data::database;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
