use crate::entities::{Reading, Statistics};

/// Arithmetic mean of the usable samples in `values`
///
/// Absent, zero and NaN samples are skipped, so a genuine reading of 0 counts
/// as missing. An input with no usable samples averages to 0.
pub fn average<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|value| *value != 0.0 && !value.is_nan())
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Aggregate a reading sequence into report statistics
pub fn compute_statistics(readings: &[Reading]) -> Statistics {
    Statistics {
        avg_heart_rate: average(readings.iter().map(|r| r.heart_rate)),
        avg_spo2: average(readings.iter().map(|r| r.spo2)),
        avg_temp: average(readings.iter().map(|r| r.body_temp)),
        avg_bp: average(readings.iter().map(Reading::blood_pressure_value)),
        fall_events: readings.iter().filter(|r| r.fall_detected).count(),
    }
}
