// HealthCheckup Data
// This crate owns persistence for health checkup records

// Database configuration, connection pool and schema bootstrap
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
