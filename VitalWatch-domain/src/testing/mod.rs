// Testing utilities and mock implementations for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use vital_watch_data::repository::tests::MockReadingRepository;

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use vital_watch_data::analysis_client::{AnalysisClientError, AnalysisClientTrait, GeminiClient, GeminiConfig};
use vital_watch_data::models::HealthReading;

use crate::entities::conversions::format_storage_timestamp;
use crate::entities::{Reading, Report};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};
use crate::services::analysis::fallback_analysis;
use crate::services::report::{assemble_report, ReportServiceError, ReportServiceTrait, INSUFFICIENT_DATA_MESSAGE};
use crate::services::statistics::compute_statistics;

/// Fixed reference time for sample readings
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Build a reading taken `minutes_ago` minutes before [`base_time`]
pub fn sample_reading(
    minutes_ago: i64,
    heart_rate: Option<f64>,
    spo2: Option<f64>,
    body_temp: Option<f64>,
    blood_pressure: Option<&str>,
    fall_detected: bool,
) -> Reading {
    Reading {
        id: Some(format!("reading-{}", minutes_ago)),
        timestamp: base_time() - Duration::minutes(minutes_ago),
        heart_rate,
        spo2,
        body_temp,
        blood_pressure: blood_pressure.map(str::to_string),
        fall_detected,
    }
}

/// Data-layer form of a domain reading, as a provider would return it
pub fn data_reading(reading: &Reading) -> HealthReading {
    HealthReading {
        id: reading.id.clone(),
        timestamp: format_storage_timestamp(&reading.timestamp),
        heart_rate: reading.heart_rate,
        spo2: reading.spo2,
        body_temp: reading.body_temp,
        blood_pressure: reading.blood_pressure.clone(),
        fall_detected: reading.fall_detected,
    }
}

/// Address nothing listens on, so connections are refused
const CLOSED_PORT_BASE: &str = "http://127.0.0.1:9";

enum MockAnalysisBehaviour {
    Reply(String),
    Unreachable,
    NetworkFailure,
    Unconfigured,
}

/// Mock implementation of AnalysisClientTrait for testing
pub struct MockAnalysisClient {
    behaviour: MockAnalysisBehaviour,
    prompts: Mutex<Vec<String>>,
}

impl MockAnalysisClient {
    fn with_behaviour(behaviour: MockAnalysisBehaviour) -> Self {
        Self {
            behaviour,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Client answering every prompt with `reply`
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::with_behaviour(MockAnalysisBehaviour::Reply(reply.into()))
    }

    /// Client whose service always fails with 503
    pub fn unreachable() -> Self {
        Self::with_behaviour(MockAnalysisBehaviour::Unreachable)
    }

    /// Client whose requests fail at the transport level
    pub fn network_failure() -> Self {
        Self::with_behaviour(MockAnalysisBehaviour::NetworkFailure)
    }

    /// Client without credentials
    pub fn unconfigured() -> Self {
        Self::with_behaviour(MockAnalysisBehaviour::Unconfigured)
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisClientTrait for MockAnalysisClient {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.behaviour {
            MockAnalysisBehaviour::Reply(reply) => Ok(reply.clone()),
            MockAnalysisBehaviour::Unreachable => Err(AnalysisClientError::Status {
                status: 503,
                message: "mock service unavailable".to_string(),
            }),
            MockAnalysisBehaviour::NetworkFailure => {
                let client = GeminiClient::new(GeminiConfig {
                    api_key: Some("test-key".to_string()),
                    api_base: CLOSED_PORT_BASE.to_string(),
                    timeout: StdDuration::from_secs(2),
                    ..GeminiConfig::default()
                })?;
                client.generate(prompt).await
            }
            MockAnalysisBehaviour::Unconfigured => Err(AnalysisClientError::NotConfigured),
        }
    }

    fn is_configured(&self) -> bool {
        !matches!(self.behaviour, MockAnalysisBehaviour::Unconfigured)
    }
}

enum MockReportOutcome {
    Report(Box<Report>),
    InsufficientData,
    FetchFailure,
}

/// Mock implementation of ReportServiceTrait for testing
pub struct MockReportService {
    outcome: MockReportOutcome,
}

impl Default for MockReportService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReportService {
    /// Create a mock that returns a rule-based report over three sample readings
    pub fn new() -> Self {
        let readings = vec![
            sample_reading(0, Some(76.0), Some(96.0), Some(36.7), Some("128/82"), false),
            sample_reading(30, Some(74.0), Some(97.0), Some(36.6), Some("124/80"), true),
            sample_reading(60, Some(72.0), Some(98.0), Some(36.5), Some("120/78"), false),
        ];
        let stats = compute_statistics(&readings);
        let analysis = fallback_analysis(&readings, &stats);

        let outcome = match assemble_report(&readings, &stats, analysis, base_time()) {
            Ok(report) => MockReportOutcome::Report(Box::new(report)),
            Err(_) => MockReportOutcome::InsufficientData,
        };
        Self { outcome }
    }

    /// Configure the mock to report that no readings are available
    pub fn with_insufficient_data() -> Self {
        Self {
            outcome: MockReportOutcome::InsufficientData,
        }
    }

    /// Configure the mock to fail as if the reading provider were down
    pub fn with_fetch_failure() -> Self {
        Self {
            outcome: MockReportOutcome::FetchFailure,
        }
    }
}

#[async_trait]
impl ReportServiceTrait for MockReportService {
    async fn generate_report(&self) -> Result<Report, ReportServiceError> {
        match &self.outcome {
            MockReportOutcome::Report(report) => Ok(report.as_ref().clone()),
            MockReportOutcome::InsufficientData => Err(ReportServiceError::InsufficientData(
                INSUFFICIENT_DATA_MESSAGE.to_string(),
            )),
            MockReportOutcome::FetchFailure => Err(ReportServiceError::Fetch(
                "mock reading provider is down".to_string(),
            )),
        }
    }
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    /// Reading provider component status
    provider_status: ComponentStatus,
    /// Analysis service component status
    analysis_status: ComponentStatus,
    /// Additional components
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            provider_status: ComponentStatus::Healthy,
            analysis_status: ComponentStatus::Healthy,
            components: HashMap::new(),
        }
    }

    /// Configure the mock with an unconfigured analysis service
    pub fn with_degraded_analysis(mut self) -> Self {
        self.analysis_status = ComponentStatus::Degraded;
        self
    }

    /// Configure the mock with an unreachable reading provider
    pub fn with_unhealthy_provider(mut self) -> Self {
        self.provider_status = ComponentStatus::Unhealthy;
        self
    }

    /// Add a custom component with a specific status
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components
            .insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        components.insert(
            crate::health::READING_PROVIDER_COMPONENT.to_string(),
            HealthComponent {
                status: self.provider_status.clone(),
                details: match self.provider_status {
                    ComponentStatus::Unhealthy => Some("Reading provider unreachable".to_string()),
                    _ => Some("mock".to_string()),
                },
            },
        );

        components.insert(
            crate::health::ANALYSIS_SERVICE_COMPONENT.to_string(),
            HealthComponent {
                status: self.analysis_status.clone(),
                details: match self.analysis_status {
                    ComponentStatus::Healthy => None,
                    _ => Some("Analysis service not configured".to_string()),
                },
            },
        );

        for (name, component) in &self.components {
            components.insert(name.clone(), component.clone());
        }

        SystemHealth::from_components(components)
    }
}
