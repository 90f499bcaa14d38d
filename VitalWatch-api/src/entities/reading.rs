use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vital_watch_domain::entities::{CreateReadingRequest as DomainCreateReadingRequest, Reading};

/// Public representation of a vitals reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthReading {
    /// Identifier assigned when the reading was stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Heart rate in beats per minute
    pub heart_rate: Option<f64>,

    /// Oxygen saturation in percent
    pub spo2: Option<f64>,

    /// Body temperature in degrees Celsius
    pub body_temp: Option<f64>,

    /// Blood pressure, e.g. "120/80"
    pub blood_pressure: Option<String>,

    /// Whether a fall was detected
    pub fall_detected: bool,
}

impl From<Reading> for HealthReading {
    fn from(reading: Reading) -> Self {
        Self {
            id: reading.id,
            timestamp: reading.timestamp,
            heart_rate: reading.heart_rate,
            spo2: reading.spo2,
            body_temp: reading.body_temp,
            blood_pressure: reading.blood_pressure,
            fall_detected: reading.fall_detected,
        }
    }
}

/// Request payload for recording a reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReadingRequest {
    /// When the reading was taken. Defaults to current time if not provided.
    pub timestamp: Option<DateTime<Utc>>,

    /// Heart rate in beats per minute (20-250)
    pub heart_rate: Option<f64>,

    /// Oxygen saturation in percent (0-100)
    pub spo2: Option<f64>,

    /// Body temperature in degrees Celsius (25-45)
    pub body_temp: Option<f64>,

    /// Blood pressure, e.g. "120/80" (at most 25 characters)
    pub blood_pressure: Option<String>,

    /// Whether a fall was detected
    #[serde(default)]
    pub fall_detected: bool,
}

impl From<CreateReadingRequest> for DomainCreateReadingRequest {
    fn from(request: CreateReadingRequest) -> Self {
        Self {
            timestamp: request.timestamp,
            heart_rate: request.heart_rate,
            spo2: request.spo2,
            body_temp: request.body_temp,
            blood_pressure: request.blood_pressure,
            fall_detected: request.fall_detected,
        }
    }
}

/// List of readings, newest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingListResponse {
    /// Number of readings returned
    pub count: usize,

    /// The readings
    pub data: Vec<HealthReading>,
}
