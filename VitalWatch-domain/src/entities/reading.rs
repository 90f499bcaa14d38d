use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Domain model for one vitals sample
///
/// Sequences of readings handed to the analytics services are ordered newest
/// first: index 0 is the most recent sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Reading {
    /// Identifier assigned by the provider, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Heart rate in beats per minute
    pub heart_rate: Option<f64>,

    /// Peripheral oxygen saturation in percent
    pub spo2: Option<f64>,

    /// Body temperature in degrees Celsius
    pub body_temp: Option<f64>,

    /// Blood pressure as "systolic/diastolic" or a single number
    pub blood_pressure: Option<String>,

    /// Whether a fall was detected with this sample
    pub fall_detected: bool,
}

impl Reading {
    /// Numeric blood pressure used for averaging
    ///
    /// Takes the leading number of the field, so "120/80" yields the
    /// systolic 120. Fields without a leading number yield `None`.
    pub fn blood_pressure_value(&self) -> Option<f64> {
        self.blood_pressure.as_deref().and_then(leading_number)
    }
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (index, ch) in text.char_indices() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            '+' | '-' if index == 0 => {}
            _ => break,
        }
        end = index + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    text[..end].parse().ok()
}

/// Request payload for recording a new reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CreateReadingRequest {
    /// When the reading was taken. Defaults to the current time.
    pub timestamp: Option<DateTime<Utc>>,

    /// Heart rate in beats per minute
    #[validate(range(min = 20.0, max = 250.0, message = "Heart rate must be between 20 and 250"))]
    pub heart_rate: Option<f64>,

    /// Peripheral oxygen saturation in percent
    #[validate(range(min = 0.0, max = 100.0, message = "SpO2 must be between 0 and 100"))]
    pub spo2: Option<f64>,

    /// Body temperature in degrees Celsius
    #[validate(range(min = 25.0, max = 45.0, message = "Body temperature must be between 25 and 45"))]
    pub body_temp: Option<f64>,

    /// Blood pressure as "systolic/diastolic" or a single number
    #[validate(length(max = 25, message = "Blood pressure cannot exceed 25 characters"))]
    pub blood_pressure: Option<String>,

    /// Whether a fall was detected
    #[serde(default)]
    pub fall_detected: bool,
}
