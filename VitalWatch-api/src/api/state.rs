use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use vital_watch_data::analysis_client::{AnalysisClientError, GeminiClient};
use vital_watch_data::repository::{HttpReadingRepository, ReadingRepository, ReadingRepositoryTrait, RepositoryError};
use vital_watch_domain::config::AppConfig;
use vital_watch_domain::health::{HealthService, HealthServiceTrait};
use vital_watch_domain::services::{
    AnalysisService, ReadingService, ReadingServiceTrait, ReportService, ReportServiceTrait,
};

/// Errors raised while wiring the services together
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to create reading provider: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Failed to create analysis client: {0}")]
    AnalysisClient(#[from] AnalysisClientError),
}

/// Services shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub reading_service: Arc<dyn ReadingServiceTrait + Send + Sync>,
    pub report_service: Arc<dyn ReportServiceTrait + Send + Sync>,
    pub health_service: Arc<dyn HealthServiceTrait + Send + Sync>,
    /// Deployment environment reported by the health check
    pub environment: String,
}

impl AppState {
    /// Build the services described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let repository: Arc<dyn ReadingRepositoryTrait + Send + Sync> = match &config.readings_api_url {
            Some(url) => Arc::new(HttpReadingRepository::new(url.clone(), config.readings_timeout)?),
            None => Arc::new(ReadingRepository::new()),
        };
        info!("Reading provider: {}", repository.describe());

        let client = GeminiClient::new(config.gemini.clone())?;
        let analysis = AnalysisService::new(Arc::new(client));

        Ok(Self::from_parts(repository, analysis, config.environment.clone()))
    }

    /// Build the services over an existing provider and analysis adapter
    pub fn from_parts(
        repository: Arc<dyn ReadingRepositoryTrait + Send + Sync>,
        analysis: AnalysisService,
        environment: String,
    ) -> Self {
        Self {
            reading_service: Arc::new(ReadingService::new(repository.clone())),
            report_service: Arc::new(ReportService::new(repository.clone(), analysis.clone())),
            health_service: Arc::new(HealthService::new(repository, analysis)),
            environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::net::TcpListener;
    use vital_watch_domain::services::ReportServiceError;

    #[tokio::test]
    async fn test_upstream_provider_uses_configured_timeout() {
        // Accepts connections into the backlog but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let config = AppConfig {
            readings_api_url: Some(format!("http://{}/readings", addr)),
            readings_timeout: Duration::from_millis(500),
            ..AppConfig::default()
        };
        let state = AppState::from_config(&config).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(10), state.report_service.generate_report())
            .await
            .expect("provider request should time out before the guard");
        assert!(matches!(result, Err(ReportServiceError::Fetch(_))));

        drop(listener);
    }
}
