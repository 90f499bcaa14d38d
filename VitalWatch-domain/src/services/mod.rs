pub mod analysis;
pub mod insights;
pub mod readings;
pub mod recommendations;
pub mod report;
pub mod risk;
pub mod scoring;
pub mod statistics;
pub mod trends;

// Domain services
// Pure analytics (statistics, trends, risk, scoring, recommendations) plus the
// services that fetch readings and drive report generation.

// Re-export services, their traits and errors
pub use analysis::{AnalysisError, AnalysisService};
pub use readings::{ReadingService, ReadingServiceError, ReadingServiceTrait};
pub use report::{ReportService, ReportServiceError, ReportServiceTrait};
