//! Generative analysis with a rule-based fallback
//!
//! [`AnalysisService::analyze`] never fails. A reply from the analysis service
//! is used only when it contains a JSON object that passes validation; any
//! transport failure, missing object, type mismatch or out-of-range value
//! yields the rule-based analysis instead.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use vital_watch_data::analysis_client::{AnalysisClientError, AnalysisClientTrait};

use crate::entities::{AiAnalysis, AiAnalysisReply, Reading, Statistics};
use crate::services::recommendations::generate_recommendations;
use crate::services::risk::identify_risk_factors;
use crate::services::scoring::{calculate_health_score, MAX_HEALTH_SCORE};
use crate::services::trends::analyze_trend;

/// Summary used whenever the rule-based analysis stands in for the service
pub const FALLBACK_SUMMARY: &str = "AI analysis temporarily unavailable, using basic assessment.";

/// Number of raw readings included in the prompt
pub const PROMPT_SAMPLE_SIZE: usize = 5;

/// Reasons a service reply was not used
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service could not be reached or refused the request
    #[error("Analysis service error: {0}")]
    Service(#[from] AnalysisClientError),

    /// The reply contained no JSON object
    #[error("No JSON object found in analysis reply")]
    MissingJson,

    /// The JSON object did not match the expected field types
    #[error("Malformed analysis reply: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field was missing or out of range
    #[error("Analysis reply failed validation: {0}")]
    Schema(String),
}

/// Analysis adapter over a generative text client
#[derive(Clone)]
pub struct AnalysisService {
    client: Arc<dyn AnalysisClientTrait + Send + Sync>,
}

impl AnalysisService {
    /// Create an adapter calling `client`
    pub fn new(client: Arc<dyn AnalysisClientTrait + Send + Sync>) -> Self {
        Self { client }
    }

    /// Whether the underlying client can make calls at all
    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Analyze a newest-first reading sequence; always returns a full result
    #[instrument(skip_all, fields(readings = readings.len()))]
    pub async fn analyze(&self, readings: &[Reading], stats: &Statistics) -> AiAnalysis {
        match self.request_analysis(readings, stats).await {
            Ok(analysis) => {
                info!("Using generative analysis (score {})", analysis.health_score);
                analysis
            }
            Err(e) => {
                warn!("Generative analysis unavailable, using rule-based assessment: {}", e);
                fallback_analysis(readings, stats)
            }
        }
    }

    async fn request_analysis(
        &self,
        readings: &[Reading],
        stats: &Statistics,
    ) -> Result<AiAnalysis, AnalysisError> {
        let prompt = build_prompt(readings, stats);
        let reply = self.client.generate(&prompt).await?;
        debug!("Analysis reply received ({} bytes)", reply.len());
        parse_analysis_reply(&reply)
    }
}

/// Rule-based analysis used when the service reply is unusable
pub fn fallback_analysis(readings: &[Reading], stats: &Statistics) -> AiAnalysis {
    AiAnalysis {
        health_score: calculate_health_score(stats),
        trends: Some(analyze_trend(readings)),
        risk_factors: identify_risk_factors(stats),
        recommendations: Some(generate_recommendations(readings)),
        summary: FALLBACK_SUMMARY.to_string(),
    }
}

/// Build the analysis prompt for a newest-first reading sequence
pub fn build_prompt(readings: &[Reading], stats: &Statistics) -> String {
    let sample: Vec<&Reading> = readings.iter().take(PROMPT_SAMPLE_SIZE).collect();

    let data = json!({
        "totalDataPoints": readings.len(),
        "averages": stats,
        "recentReadings": sample,
        "timeSpan": {
            "from": readings.last().map(|r| r.timestamp),
            "to": readings.first().map(|r| r.timestamp),
        },
    });

    format!(
        r#"As a healthcare AI assistant, analyze the following elderly patient health monitoring data and provide a comprehensive health report:

Health Data:
{data}

Please provide a detailed analysis including:

1. **Health Score** (1-100 scale): Overall health assessment based on all vitals
2. **Trends**: Identify patterns in heart rate, SpO2, temperature, and blood pressure over time
3. **Risk Factors**: Any concerning patterns or values that indicate health risks
4. **Recommendations**: Specific, actionable health recommendations for the elderly patient
5. **Summary**: A brief overall health status summary

Focus on elderly-specific health concerns such as:
- Fall risk assessment
- Cardiovascular health
- Respiratory function
- Temperature regulation
- Blood pressure management

Provide practical, easy-to-understand recommendations suitable for elderly care.

Please format your response as a JSON object with the following structure:
{{
  "healthScore": number,
  "trends": "detailed trends analysis",
  "riskFactors": ["risk1", "risk2", ...],
  "recommendations": ["recommendation1", "recommendation2", ...],
  "summary": "brief overall summary"
}}
"#
    )
}

/// Read the first complete JSON object embedded in `text`
///
/// Each `{` is tried in turn as the start of an object; the first one that
/// deserializes wins and anything after it is ignored. Surrounding prose and
/// markdown fences are dropped.
pub fn extract_json_object(text: &str) -> Result<AiAnalysisReply, AnalysisError> {
    let mut first_error = None;

    for (start, _) in text.match_indices('{') {
        let mut objects = serde_json::Deserializer::from_str(&text[start..]).into_iter::<AiAnalysisReply>();
        match objects.next() {
            Some(Ok(reply)) => return Ok(reply),
            Some(Err(e)) => {
                first_error.get_or_insert(e);
            }
            None => {}
        }
    }

    Err(first_error.map_or(AnalysisError::MissingJson, AnalysisError::Parse))
}

/// Parse and validate a free-text service reply
pub fn parse_analysis_reply(text: &str) -> Result<AiAnalysis, AnalysisError> {
    validate_reply(extract_json_object(text)?)
}

/// Check a parsed reply and turn it into an analysis
///
/// Score, risk factors and a non-blank summary are required; an empty
/// `trends` string counts as absent.
pub fn validate_reply(reply: AiAnalysisReply) -> Result<AiAnalysis, AnalysisError> {
    let score = reply
        .health_score
        .ok_or_else(|| AnalysisError::Schema("healthScore is missing".to_string()))?;
    if !score.is_finite() || score < 0.0 || score > f64::from(MAX_HEALTH_SCORE) {
        return Err(AnalysisError::Schema(format!(
            "healthScore {} is outside 0..={}",
            score, MAX_HEALTH_SCORE
        )));
    }

    let risk_factors = reply
        .risk_factors
        .ok_or_else(|| AnalysisError::Schema("riskFactors is missing".to_string()))?;

    let summary = reply
        .summary
        .filter(|summary| !summary.trim().is_empty())
        .ok_or_else(|| AnalysisError::Schema("summary is missing".to_string()))?;

    Ok(AiAnalysis {
        health_score: score.round() as u8,
        trends: reply.trends.filter(|trends| !trends.trim().is_empty()),
        risk_factors,
        recommendations: reply.recommendations,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::statistics::compute_statistics;
    use crate::testing::{sample_reading, MockAnalysisClient};

    fn readings() -> Vec<Reading> {
        (0..6)
            .map(|i| sample_reading(i, Some(72.0), Some(97.0), Some(36.6), Some("125/82"), i == 3))
            .collect()
    }

    const FULL_REPLY: &str = r#"Here is the analysis:
```json
{
  "healthScore": 82.4,
  "trends": "Heart rate steady around 72 bpm.",
  "riskFactors": ["Fall incidents detected"],
  "recommendations": ["Install grab bars in the bathroom."],
  "summary": "Generally stable with one fall."
}
```"#;

    #[test]
    fn test_extract_json_object() {
        let reply = extract_json_object(r#"noise {"healthScore": 70, "extra": {"b": 1}} tail"#).unwrap();
        assert_eq!(reply.health_score, Some(70.0));

        assert!(matches!(extract_json_object("no json here"), Err(AnalysisError::MissingJson)));
        assert!(matches!(extract_json_object("} backwards {"), Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn test_trailing_prose_with_braces_is_ignored() {
        let analysis = parse_analysis_reply(
            "{\"healthScore\": 80, \"riskFactors\": [], \"summary\": \"Stable.\"}\nNote: values are in {bpm}.",
        )
        .unwrap();
        assert_eq!(analysis.health_score, 80);
        assert_eq!(analysis.summary, "Stable.");
    }

    #[test]
    fn test_leading_prose_with_braces_is_skipped() {
        let analysis = parse_analysis_reply(
            "Units in {bpm} and {%}:\n{\"healthScore\": 65, \"riskFactors\": [\"Low activity\"], \"summary\": \"Fair.\"}",
        )
        .unwrap();
        assert_eq!(analysis.health_score, 65);
        assert_eq!(analysis.risk_factors, vec!["Low activity"]);
    }

    #[test]
    fn test_parse_full_reply() {
        let analysis = parse_analysis_reply(FULL_REPLY).unwrap();
        assert_eq!(analysis.health_score, 82);
        assert_eq!(analysis.trends.as_deref(), Some("Heart rate steady around 72 bpm."));
        assert_eq!(analysis.risk_factors, vec!["Fall incidents detected"]);
        assert_eq!(analysis.recommendations, Some(vec!["Install grab bars in the bathroom.".to_string()]));
        assert_eq!(analysis.summary, "Generally stable with one fall.");
    }

    #[test]
    fn test_partial_reply_keeps_optional_gaps() {
        let analysis = parse_analysis_reply(
            r#"{"healthScore": 90, "riskFactors": [], "summary": "Fine.", "trends": ""}"#,
        )
        .unwrap();
        assert_eq!(analysis.health_score, 90);
        assert!(analysis.trends.is_none());
        assert!(analysis.recommendations.is_none());
        assert!(analysis.risk_factors.is_empty());
    }

    #[test]
    fn test_rejects_malformed_replies() {
        assert!(matches!(parse_analysis_reply("I cannot help"), Err(AnalysisError::MissingJson)));
        assert!(matches!(parse_analysis_reply("{not json}"), Err(AnalysisError::Parse(_))));
        assert!(matches!(
            parse_analysis_reply(r#"{"healthScore": "85", "riskFactors": [], "summary": "x"}"#),
            Err(AnalysisError::Parse(_))
        ));
        assert!(matches!(
            parse_analysis_reply(r#"{"healthScore": 85, "riskFactors": "none", "summary": "x"}"#),
            Err(AnalysisError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_missing_or_out_of_range_fields() {
        for reply in [
            r#"{"riskFactors": [], "summary": "x"}"#,
            r#"{"healthScore": 140, "riskFactors": [], "summary": "x"}"#,
            r#"{"healthScore": -1, "riskFactors": [], "summary": "x"}"#,
            r#"{"healthScore": 70, "summary": "x"}"#,
            r#"{"healthScore": 70, "riskFactors": []}"#,
            r#"{"healthScore": 70, "riskFactors": [], "summary": "   "}"#,
        ] {
            assert!(
                matches!(parse_analysis_reply(reply), Err(AnalysisError::Schema(_))),
                "reply should fail validation: {}",
                reply
            );
        }
    }

    #[test]
    fn test_prompt_embeds_statistics_and_sample() {
        let readings = readings();
        let stats = compute_statistics(&readings);
        let prompt = build_prompt(&readings, &stats);

        assert!(prompt.contains("\"totalDataPoints\":6"));
        assert!(prompt.contains("\"avgHeartRate\":72.0"));
        assert!(prompt.contains("\"fallEvents\":1"));
        assert!(prompt.contains("\"healthScore\": number"));
        // only the five most recent readings are sampled
        assert_eq!(prompt.matches("\"fall_detected\"").count(), PROMPT_SAMPLE_SIZE);
    }

    #[tokio::test]
    async fn test_analyze_uses_valid_reply() {
        let service = AnalysisService::new(Arc::new(MockAnalysisClient::with_reply(FULL_REPLY)));
        let readings = readings();
        let stats = compute_statistics(&readings);

        let analysis = service.analyze(&readings, &stats).await;
        assert_eq!(analysis.health_score, 82);
        assert_eq!(analysis.summary, "Generally stable with one fall.");
    }

    #[tokio::test]
    async fn test_analyze_falls_back_when_service_unreachable() {
        let service = AnalysisService::new(Arc::new(MockAnalysisClient::unreachable()));
        let readings = readings();
        let stats = compute_statistics(&readings);

        let analysis = service.analyze(&readings, &stats).await;
        assert_eq!(analysis, fallback_analysis(&readings, &stats));
        assert_eq!(analysis.summary, FALLBACK_SUMMARY);
        assert_eq!(analysis.health_score, calculate_health_score(&stats));
    }

    #[tokio::test]
    async fn test_analyze_falls_back_on_network_failure() {
        let service = AnalysisService::new(Arc::new(MockAnalysisClient::network_failure()));
        let readings = readings();
        let stats = compute_statistics(&readings);

        let analysis = service.analyze(&readings, &stats).await;
        assert_eq!(analysis, fallback_analysis(&readings, &stats));
    }

    #[tokio::test]
    async fn test_analyze_falls_back_on_garbage_reply() {
        let service = AnalysisService::new(Arc::new(MockAnalysisClient::with_reply(
            r#"{"healthScore": 250, "riskFactors": [], "summary": "Too good"}"#,
        )));
        let readings = readings();
        let stats = compute_statistics(&readings);

        let analysis = service.analyze(&readings, &stats).await;
        assert_eq!(analysis, fallback_analysis(&readings, &stats));
    }

    #[tokio::test]
    async fn test_analyze_sends_prompt_to_client() {
        let client = Arc::new(MockAnalysisClient::with_reply(FULL_REPLY));
        let service = AnalysisService::new(client.clone());
        let readings = readings();
        let stats = compute_statistics(&readings);

        service.analyze(&readings, &stats).await;

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("elderly patient"));
    }
}
