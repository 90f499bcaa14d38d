use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::models::reading::{CreateReadingRequest, HealthReading};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;

/// Longest response body echoed back in an error
const MAX_ERROR_BODY: usize = 512;

/// Repository trait for vitals readings
#[async_trait]
pub trait ReadingRepositoryTrait: Send + Sync {
    /// Record a new reading
    async fn create(&self, request: CreateReadingRequest) -> Result<HealthReading, RepositoryError>;

    /// Get readings ordered newest first, optionally capped at `limit`
    async fn get_recent(&self, limit: Option<usize>) -> Result<Vec<HealthReading>, RepositoryError>;

    /// Short label used in logs and health checks
    fn describe(&self) -> String;
}

/// Reading repository kept in process memory
#[derive(Debug, Clone, Default)]
pub struct ReadingRepository {
    storage: InMemoryStorage,
}

impl ReadingRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }
}

#[async_trait]
impl ReadingRepositoryTrait for ReadingRepository {
    async fn create(&self, request: CreateReadingRequest) -> Result<HealthReading, RepositoryError> {
        let reading = HealthReading {
            id: Some(Uuid::new_v4().to_string()),
            timestamp: request.timestamp,
            heart_rate: request.heart_rate,
            spo2: request.spo2,
            body_temp: request.body_temp,
            blood_pressure: request.blood_pressure,
            fall_detected: request.fall_detected,
        };

        debug!("Storing reading in memory: {:?}", reading.id);
        self.storage.store_reading(&reading).await
    }

    async fn get_recent(&self, limit: Option<usize>) -> Result<Vec<HealthReading>, RepositoryError> {
        self.storage.get_recent(limit).await
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// Read-only repository backed by the monitoring backend's REST endpoint.
///
/// The endpoint must answer a GET with a JSON array of readings, newest first.
#[derive(Debug, Clone)]
pub struct HttpReadingRepository {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReadingRepository {
    /// Create a repository reading from `endpoint`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RepositoryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Create a repository over an existing HTTP client
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ReadingRepositoryTrait for HttpReadingRepository {
    async fn create(&self, _request: CreateReadingRequest) -> Result<HealthReading, RepositoryError> {
        Err(RepositoryError::Unsupported(
            "readings are recorded by the upstream monitoring backend".to_string(),
        ))
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn get_recent(&self, limit: Option<usize>) -> Result<Vec<HealthReading>, RepositoryError> {
        debug!("Fetching readings from upstream provider");

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Reading provider returned {}", status);
            return Err(RepositoryError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let mut readings: Vec<HealthReading> = serde_json::from_str(&body)?;
        if let Some(limit) = limit {
            readings.truncate(limit);
        }

        debug!("Fetched {} readings", readings.len());
        Ok(readings)
    }

    fn describe(&self) -> String {
        format!("http ({})", self.endpoint)
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}

/// Mock reading repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;

    /// Mock implementation of ReadingRepositoryTrait for testing
    pub struct MockReadingRepository {
        readings: Vec<HealthReading>,
        fail_with_status: Option<u16>,
    }

    impl Default for MockReadingRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockReadingRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                readings: Vec::new(),
                fail_with_status: None,
            }
        }

        /// Create a mock repository with predefined readings, returned as given
        pub fn with_readings(readings: Vec<HealthReading>) -> Self {
            Self {
                readings,
                fail_with_status: None,
            }
        }

        /// Configure the mock to fail every fetch with the given HTTP status
        pub fn with_failure(mut self, status: u16) -> Self {
            self.fail_with_status = Some(status);
            self
        }
    }

    #[async_trait]
    impl ReadingRepositoryTrait for MockReadingRepository {
        async fn create(&self, request: CreateReadingRequest) -> Result<HealthReading, RepositoryError> {
            Ok(HealthReading {
                id: Some(Uuid::new_v4().to_string()),
                timestamp: request.timestamp,
                heart_rate: request.heart_rate,
                spo2: request.spo2,
                body_temp: request.body_temp,
                blood_pressure: request.blood_pressure,
                fall_detected: request.fall_detected,
            })
        }

        async fn get_recent(&self, limit: Option<usize>) -> Result<Vec<HealthReading>, RepositoryError> {
            if let Some(status) = self.fail_with_status {
                return Err(RepositoryError::UnexpectedStatus {
                    status,
                    body: "mock failure".to_string(),
                });
            }

            let limit = limit.unwrap_or(self.readings.len());
            Ok(self.readings.iter().take(limit).cloned().collect())
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    #[cfg(test)]
    mod repository_tests {
        use super::*;

        fn request(timestamp: &str, heart_rate: f64) -> CreateReadingRequest {
            CreateReadingRequest {
                timestamp: timestamp.to_string(),
                heart_rate: Some(heart_rate),
                spo2: Some(98.0),
                body_temp: Some(36.6),
                blood_pressure: Some("120/80".to_string()),
                fall_detected: false,
            }
        }

        #[tokio::test]
        async fn test_in_memory_repository_round_trip() {
            let repo = ReadingRepository::new();
            assert!(repo.get_recent(None).await.unwrap().is_empty());

            let created = repo.create(request("2024-05-01T08:00:00.000Z", 72.0)).await.unwrap();
            assert!(created.id.is_some());

            repo.create(request("2024-05-01T09:00:00.000Z", 80.0)).await.unwrap();

            let readings = repo.get_recent(None).await.unwrap();
            assert_eq!(readings.len(), 2);
            assert_eq!(readings[0].heart_rate, Some(80.0));
            assert_eq!(readings[1].heart_rate, Some(72.0));
        }

        #[tokio::test]
        async fn test_http_repository_rejects_create() {
            let repo = HttpReadingRepository::with_client(reqwest::Client::new(), "http://127.0.0.1:9/readings");
            let result = repo.create(request("2024-05-01T08:00:00.000Z", 72.0)).await;
            assert!(matches!(result, Err(RepositoryError::Unsupported(_))));
        }

        #[tokio::test]
        async fn test_http_repository_unreachable_is_http_error() {
            // Port 9 (discard) is not expected to accept HTTP connections
            let repo = HttpReadingRepository::new("http://127.0.0.1:9/readings", Duration::from_secs(2)).unwrap();
            let result = repo.get_recent(None).await;
            assert!(matches!(result, Err(RepositoryError::Http(_))));
        }

        #[tokio::test]
        async fn test_mock_failure() {
            let repo = MockReadingRepository::new().with_failure(503);
            let result = repo.get_recent(None).await;
            assert!(matches!(result, Err(RepositoryError::UnexpectedStatus { status: 503, .. })));
        }

        #[test]
        fn test_truncate() {
            assert_eq!(truncate("short", 10), "short");
            assert_eq!(truncate("abcdef", 3), "abc...");
        }
    }
}
