use serde::{Deserialize, Deserializer, Serialize};

/// Storage model for a single vitals sample, in the wire shape the
/// monitoring backend uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReading {
    /// Unique identifier for the reading, when the provider assigns one
    #[serde(
        default,
        deserialize_with = "deserialize_reading_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// When the reading was taken (RFC 3339)
    pub timestamp: String,

    /// Heart rate in beats per minute
    #[serde(default)]
    pub heart_rate: Option<f64>,

    /// Peripheral oxygen saturation in percent
    #[serde(default)]
    pub spo2: Option<f64>,

    /// Body temperature in degrees Celsius
    #[serde(default)]
    pub body_temp: Option<f64>,

    /// Blood pressure as "systolic/diastolic" or a single number
    #[serde(default)]
    pub blood_pressure: Option<String>,

    /// Whether the device flagged a fall with this sample
    #[serde(default)]
    pub fall_detected: bool,
}

/// Backends key readings either by UUID string or by integer primary key
#[derive(Deserialize)]
#[serde(untagged)]
enum ReadingId {
    Text(String),
    Number(i64),
}

fn deserialize_reading_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ReadingId>::deserialize(deserializer)?.map(|id| match id {
        ReadingId::Text(text) => text,
        ReadingId::Number(number) => number.to_string(),
    }))
}

/// Input data for recording a new reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReadingRequest {
    /// When the reading was taken (RFC 3339, UTC)
    pub timestamp: String,

    /// Heart rate in beats per minute
    pub heart_rate: Option<f64>,

    /// Peripheral oxygen saturation in percent
    pub spo2: Option<f64>,

    /// Body temperature in degrees Celsius
    pub body_temp: Option<f64>,

    /// Blood pressure as "systolic/diastolic" or a single number
    pub blood_pressure: Option<String>,

    /// Whether a fall was detected
    pub fall_detected: bool,
}
