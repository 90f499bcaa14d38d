use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Aggregate vitals over one reading sequence
///
/// Derived per report generation and never stored. Averages of a vital with
/// no usable samples are 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Statistics {
    pub avg_heart_rate: f64,
    pub avg_spo2: f64,
    pub avg_temp: f64,
    #[serde(rename = "avgBP")]
    pub avg_bp: f64,
    pub fall_events: usize,
}

/// Reply object as the analysis service returns it; any field may be absent
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysisReply {
    pub health_score: Option<f64>,
    pub trends: Option<String>,
    pub risk_factors: Option<Vec<String>>,
    pub recommendations: Option<Vec<String>>,
    pub summary: Option<String>,
}

/// Analysis result handed to the report assembler
///
/// Score, risk factors and summary are always present: the analysis adapter
/// either validates them out of the service reply or substitutes the
/// rule-based values. Trends and recommendations may still be missing and are
/// filled in by the assembler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub health_score: u8,
    pub trends: Option<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Option<Vec<String>>,
    pub summary: String,
}

/// Span of time covered by a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct TimeRange {
    /// Timestamp of the oldest reading
    pub from: DateTime<Utc>,
    /// Timestamp of the most recent reading
    pub to: DateTime<Utc>,
}

/// Averaged vitals shown on a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Averages {
    pub heart_rate: f64,
    pub spo2: f64,
    pub temperature: f64,
    pub blood_pressure: f64,
}

impl From<&Statistics> for Averages {
    fn from(stats: &Statistics) -> Self {
        Self {
            heart_rate: stats.avg_heart_rate,
            spo2: stats.avg_spo2,
            temperature: stats.avg_temp,
            blood_pressure: stats.avg_bp,
        }
    }
}

/// Health report assembled for one generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub data_points: usize,
    pub time_range: TimeRange,
    pub averages: Averages,
    pub fall_events: usize,
    pub trends: String,
    pub recommendations: Vec<String>,
    pub health_score: u8,
    pub risk_factors: Vec<String>,
    pub summary: String,
}

/// Coarse reading of a health score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum HealthCategory {
    /// Score of 80 or more
    Good,
    /// Score from 60 to 79
    Fair,
    /// Score below 60
    NeedsAttention,
}

impl std::fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthCategory::Good => write!(f, "Good Health"),
            HealthCategory::Fair => write!(f, "Fair Health"),
            HealthCategory::NeedsAttention => write!(f, "Needs Attention"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_serialize_with_prompt_field_names() {
        let stats = Statistics {
            avg_heart_rate: 70.0,
            avg_spo2: 98.0,
            avg_temp: 36.5,
            avg_bp: 120.0,
            fall_events: 0,
        };
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["avgHeartRate"], 70.0);
        assert_eq!(value["avgSpo2"], 98.0);
        assert_eq!(value["avgTemp"], 36.5);
        assert_eq!(value["avgBP"], 120.0);
        assert_eq!(value["fallEvents"], 0);
    }

    #[test]
    fn test_reply_fields_are_optional() {
        let reply: AiAnalysisReply = serde_json::from_str(r#"{"summary": "ok"}"#).unwrap();
        assert_eq!(reply.summary.as_deref(), Some("ok"));
        assert!(reply.health_score.is_none());
        assert!(reply.trends.is_none());
        assert!(reply.risk_factors.is_none());
        assert!(reply.recommendations.is_none());
    }

    #[test]
    fn test_health_category_labels() {
        assert_eq!(HealthCategory::Good.to_string(), "Good Health");
        assert_eq!(HealthCategory::Fair.to_string(), "Fair Health");
        assert_eq!(HealthCategory::NeedsAttention.to_string(), "Needs Attention");
    }
}
