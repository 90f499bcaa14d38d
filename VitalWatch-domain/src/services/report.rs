use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, instrument};

use vital_watch_data::repository::{ReadingRepositoryTrait, RepositoryError};

use crate::entities::conversions;
use crate::entities::{AiAnalysis, Averages, Reading, Report, Statistics, TimeRange};
use crate::services::analysis::AnalysisService;
use crate::services::recommendations::generate_recommendations;
use crate::services::statistics::compute_statistics;
use crate::services::trends::analyze_trend;

/// Message returned when there is nothing to report on
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Not enough health data to generate a report";

/// Report service errors
#[derive(Debug, Error)]
pub enum ReportServiceError {
    /// No readings were available
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The reading provider could not be reached or returned bad data
    #[error("Failed to fetch readings: {0}")]
    Fetch(String),
}

/// Trait for report generation
#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    /// Fetch the current readings and build a report from them
    async fn generate_report(&self) -> Result<Report, ReportServiceError>;
}

/// Report service combining the reading provider and the analysis adapter
pub struct ReportService {
    repository: Arc<dyn ReadingRepositoryTrait + Send + Sync>,
    analysis: AnalysisService,
}

impl ReportService {
    /// Create a new report service
    pub fn new(repository: Arc<dyn ReadingRepositoryTrait + Send + Sync>, analysis: AnalysisService) -> Self {
        Self { repository, analysis }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> ReportServiceError {
        error!("Reading provider {} failed: {}", self.repository.describe(), err);
        ReportServiceError::Fetch(err.to_string())
    }

    async fn fetch_readings(&self) -> Result<Vec<Reading>, ReportServiceError> {
        let data_readings = self
            .repository
            .get_recent(None)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        let mut readings = data_readings
            .into_iter()
            .map(conversions::convert_to_domain_reading)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                error!("Reading provider returned an unusable reading: {}", e);
                ReportServiceError::Fetch(e)
            })?;

        // The provider should already return newest first
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(readings)
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    #[instrument(skip(self))]
    async fn generate_report(&self) -> Result<Report, ReportServiceError> {
        let readings = self.fetch_readings().await?;
        if readings.is_empty() {
            return Err(ReportServiceError::InsufficientData(INSUFFICIENT_DATA_MESSAGE.to_string()));
        }

        let stats = compute_statistics(&readings);
        let analysis = self.analysis.analyze(&readings, &stats).await;
        let report = assemble_report(&readings, &stats, analysis, Utc::now())?;

        info!(
            "Generated report over {} readings (score {})",
            report.data_points, report.health_score
        );
        Ok(report)
    }
}

/// Combine readings, statistics and an analysis into a report
///
/// Missing `trends` or `recommendations` are filled in from the rule-based
/// functions; the score, risk factors and summary come from `analysis` as-is.
pub fn assemble_report(
    readings: &[Reading],
    stats: &Statistics,
    analysis: AiAnalysis,
    generated_at: DateTime<Utc>,
) -> Result<Report, ReportServiceError> {
    let (newest, oldest) = match (readings.first(), readings.last()) {
        (Some(newest), Some(oldest)) => (newest, oldest),
        _ => return Err(ReportServiceError::InsufficientData(INSUFFICIENT_DATA_MESSAGE.to_string())),
    };

    let AiAnalysis {
        health_score,
        trends,
        risk_factors,
        recommendations,
        summary,
    } = analysis;

    Ok(Report {
        generated_at,
        data_points: readings.len(),
        time_range: TimeRange {
            from: oldest.timestamp,
            to: newest.timestamp,
        },
        averages: Averages::from(stats),
        fall_events: stats.fall_events,
        trends: trends.unwrap_or_else(|| analyze_trend(readings)),
        recommendations: recommendations.unwrap_or_else(|| generate_recommendations(readings)),
        health_score,
        risk_factors,
        summary,
    })
}
