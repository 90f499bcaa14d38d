//! Domain layer health check functionality
//! This module reports on the reading provider and the analysis service

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use vital_watch_data::repository::ReadingRepositoryTrait;

use crate::services::AnalysisService;

/// Component name of the reading provider
pub const READING_PROVIDER_COMPONENT: &str = "reading_provider";

/// Component name of the analysis service
pub const ANALYSIS_SERVICE_COMPONENT: &str = "analysis_service";

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning with reduced capability
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Combine component statuses; the worst one wins
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Health service probing the configured components
pub struct HealthService {
    repository: Arc<dyn ReadingRepositoryTrait + Send + Sync>,
    analysis: AnalysisService,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("reading_provider", &self.repository.describe())
            .field("analysis_configured", &self.analysis.is_configured())
            .finish()
    }
}

impl HealthService {
    /// Create a health service over the given components
    pub fn new(repository: Arc<dyn ReadingRepositoryTrait + Send + Sync>, analysis: AnalysisService) -> Self {
        Self { repository, analysis }
    }

    async fn check_reading_provider(&self) -> HealthComponent {
        match self.repository.get_recent(Some(1)).await {
            Ok(_) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: Some(self.repository.describe()),
            },
            Err(e) => {
                warn!("Reading provider health check failed: {}", e);
                HealthComponent {
                    status: ComponentStatus::Unhealthy,
                    details: Some(format!("{}: {}", self.repository.describe(), e)),
                }
            }
        }
    }

    fn check_analysis_service(&self) -> HealthComponent {
        if self.analysis.is_configured() {
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            }
        } else {
            HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some("Not configured - reports use the rule-based assessment".to_string()),
            }
        }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let components = vec![
            (READING_PROVIDER_COMPONENT.to_string(), self.check_reading_provider().await),
            (ANALYSIS_SERVICE_COMPONENT.to_string(), self.check_analysis_service()),
        ]
        .into_iter()
        .collect();

        SystemHealth::from_components(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAnalysisClient, MockReadingRepository};

    fn service(repository: MockReadingRepository, client: MockAnalysisClient) -> HealthService {
        HealthService::new(Arc::new(repository), AnalysisService::new(Arc::new(client)))
    }

    #[tokio::test]
    async fn test_all_components_healthy() {
        let health = service(MockReadingRepository::new(), MockAnalysisClient::with_reply("{}"))
            .get_system_health()
            .await;

        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components.contains_key(READING_PROVIDER_COMPONENT));
        assert!(health.components.contains_key(ANALYSIS_SERVICE_COMPONENT));
    }

    #[tokio::test]
    async fn test_unconfigured_analysis_is_degraded() {
        let health = service(MockReadingRepository::new(), MockAnalysisClient::unconfigured())
            .get_system_health()
            .await;

        assert_eq!(health.status, SystemStatus::Degraded);
        assert_eq!(
            health.components[ANALYSIS_SERVICE_COMPONENT].status,
            ComponentStatus::Degraded
        );
    }

    #[tokio::test]
    async fn test_failing_provider_is_unhealthy() {
        let health = service(
            MockReadingRepository::new().with_failure(503),
            MockAnalysisClient::unconfigured(),
        )
        .get_system_health()
        .await;

        assert_eq!(health.status, SystemStatus::Unhealthy);
        assert_eq!(
            health.components[READING_PROVIDER_COMPONENT].status,
            ComponentStatus::Unhealthy
        );
    }
}
