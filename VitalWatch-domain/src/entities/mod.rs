// Domain entities and value objects
pub mod reading;
pub mod report;
pub mod conversions;

// Re-export common types for easier imports
pub use reading::{CreateReadingRequest, Reading};
pub use report::{AiAnalysis, AiAnalysisReply, Averages, HealthCategory, Report, Statistics, TimeRange};
