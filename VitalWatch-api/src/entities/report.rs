use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vital_watch_domain::entities::{Averages, Report};
use vital_watch_domain::services::insights::categorize_health_score;

/// Display format for report timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Time span covered by a report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicTimeRange {
    /// Oldest reading
    pub from: String,
    /// Most recent reading
    pub to: String,
}

/// Averaged vitals, rounded to one decimal place
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicAverages {
    pub heart_rate: f64,
    pub spo2: f64,
    pub temperature: f64,
    pub blood_pressure: f64,
}

impl From<Averages> for PublicAverages {
    fn from(averages: Averages) -> Self {
        Self {
            heart_rate: round_to_tenth(averages.heart_rate),
            spo2: round_to_tenth(averages.spo2),
            temperature: round_to_tenth(averages.temperature),
            blood_pressure: round_to_tenth(averages.blood_pressure),
        }
    }
}

/// Health report as shown to caregivers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicHealthReport {
    /// When the report was generated
    pub generated_at: String,
    /// Number of readings analyzed
    pub data_points: usize,
    pub time_range: PublicTimeRange,
    pub averages: PublicAverages,
    /// Readings flagged as falls
    pub fall_events: usize,
    pub trends: String,
    pub recommendations: Vec<String>,
    /// Overall score from 0 to 100
    pub health_score: u8,
    /// "Good Health", "Fair Health" or "Needs Attention"
    pub health_category: String,
    pub risk_factors: Vec<String>,
    pub summary: String,
}

impl From<Report> for PublicHealthReport {
    fn from(report: Report) -> Self {
        Self {
            generated_at: format_timestamp(&report.generated_at),
            data_points: report.data_points,
            time_range: PublicTimeRange {
                from: format_timestamp(&report.time_range.from),
                to: format_timestamp(&report.time_range.to),
            },
            averages: report.averages.into(),
            fall_events: report.fall_events,
            trends: report.trends,
            recommendations: report.recommendations,
            health_score: report.health_score,
            health_category: categorize_health_score(report.health_score).to_string(),
            risk_factors: report.risk_factors,
            summary: report.summary,
        }
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
