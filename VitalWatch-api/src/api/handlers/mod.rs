pub mod health;
pub mod readings;
pub mod reports;

// Re-export handlers for easier imports
pub use health::health_check;
pub use readings::{list_readings, record_reading};
pub use reports::generate_report;
