pub mod health;
pub mod health_records;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::{health_check, metrics};
pub use health_records::{
    create_health_record, delete_health_record, get_health_record, list_health_records,
    update_health_record,
};
