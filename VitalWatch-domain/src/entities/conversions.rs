use chrono::{DateTime, SecondsFormat, Utc};

use crate::entities::reading::{CreateReadingRequest, Reading};
use vital_watch_data::models::reading as data;

// Conversion functions between domain entities and data models
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Render a timestamp in the normalized storage form
///
/// Every stored timestamp uses UTC with millisecond precision, so string
/// order matches chronological order.
pub fn format_storage_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp from a provider into UTC
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid timestamp '{}': {}", timestamp, e))
}

/// Convert from data model to domain entity for a reading
pub fn convert_to_domain_reading(data_reading: data::HealthReading) -> Result<Reading, String> {
    let timestamp = parse_timestamp(&data_reading.timestamp)?;

    Ok(Reading {
        id: data_reading.id,
        timestamp,
        heart_rate: data_reading.heart_rate,
        spo2: data_reading.spo2,
        body_temp: data_reading.body_temp,
        blood_pressure: data_reading.blood_pressure,
        fall_detected: data_reading.fall_detected,
    })
}

/// Convert from domain entity to data model for create request
///
/// A missing timestamp is stamped with `now`.
pub fn convert_to_data_create_request(
    domain_request: &CreateReadingRequest,
    now: DateTime<Utc>,
) -> data::CreateReadingRequest {
    let timestamp = domain_request.timestamp.unwrap_or(now);

    data::CreateReadingRequest {
        timestamp: format_storage_timestamp(&timestamp),
        heart_rate: domain_request.heart_rate,
        spo2: domain_request.spo2,
        body_temp: domain_request.body_temp,
        blood_pressure: domain_request.blood_pressure.clone(),
        fall_detected: domain_request.fall_detected,
    }
}
