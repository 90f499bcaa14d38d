// Storage and wire models
pub mod reading;

pub use reading::{CreateReadingRequest, HealthReading};
