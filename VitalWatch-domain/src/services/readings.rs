use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, instrument};
use validator::Validate;

use vital_watch_data::repository::{ReadingRepositoryTrait, RepositoryError};

use crate::entities::conversions;
use crate::entities::{CreateReadingRequest, Reading};

/// Readings returned when no limit is requested
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Upper bound on a requested limit
pub const MAX_LIST_LIMIT: usize = 1000;

/// Reading service errors
#[derive(Debug, Error)]
pub enum ReadingServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The provider does not accept new readings
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Trait for recording and listing readings
#[async_trait]
pub trait ReadingServiceTrait: Send + Sync {
    /// Validate and store a new reading
    async fn record_reading(&self, request: CreateReadingRequest) -> Result<Reading, ReadingServiceError>;

    /// List stored readings, newest first
    async fn list_readings(&self, limit: Option<usize>) -> Result<Vec<Reading>, ReadingServiceError>;
}

/// Reading service over a reading provider
pub struct ReadingService {
    repository: Arc<dyn ReadingRepositoryTrait + Send + Sync>,
}

impl ReadingService {
    /// Create a new reading service
    pub fn new(repository: Arc<dyn ReadingRepositoryTrait + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> ReadingServiceError {
        match err {
            RepositoryError::Validation(msg) => ReadingServiceError::ValidationError(msg),
            RepositoryError::Unsupported(msg) => ReadingServiceError::Unsupported(msg),
            _ => ReadingServiceError::RepositoryError(err.to_string()),
        }
    }
}

/// Check a request, flattening validator errors into "field: message" pairs
fn validate_request(request: &CreateReadingRequest) -> Result<(), ReadingServiceError> {
    if let Err(validation_errors) = request.validate() {
        let mut messages: Vec<String> = validation_errors
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let error_msgs: Vec<String> = errors
                    .iter()
                    .map(|err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid {}", field),
                    })
                    .collect();
                format!("{}: {}", field, error_msgs.join(", "))
            })
            .collect();
        messages.sort();

        return Err(ReadingServiceError::ValidationError(messages.join("; ")));
    }

    if request.heart_rate.is_some_and(f64::is_nan)
        || request.spo2.is_some_and(f64::is_nan)
        || request.body_temp.is_some_and(f64::is_nan)
    {
        return Err(ReadingServiceError::ValidationError(
            "Vital signs must be numbers".to_string(),
        ));
    }

    Ok(())
}

#[async_trait]
impl ReadingServiceTrait for ReadingService {
    #[instrument(skip(self, request))]
    async fn record_reading(&self, request: CreateReadingRequest) -> Result<Reading, ReadingServiceError> {
        validate_request(&request)?;

        let data_request = conversions::convert_to_data_create_request(&request, Utc::now());
        let data_reading = self
            .repository
            .create(data_request)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        debug!("Recorded reading {:?}", data_reading.id);
        conversions::convert_to_domain_reading(data_reading).map_err(ReadingServiceError::RepositoryError)
    }

    #[instrument(skip(self))]
    async fn list_readings(&self, limit: Option<usize>) -> Result<Vec<Reading>, ReadingServiceError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);

        let data_readings = self
            .repository
            .get_recent(Some(limit))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        data_readings
            .into_iter()
            .map(conversions::convert_to_domain_reading)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ReadingServiceError::RepositoryError)
    }
}
