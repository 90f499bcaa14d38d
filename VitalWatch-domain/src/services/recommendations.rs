use crate::entities::Reading;

pub const ELEVATED_HEART_RATE_ADVICE: &str =
    "Heart rate appears elevated. Consider rest and monitoring.";
pub const LOW_OXYGEN_ADVICE: &str =
    "Oxygen saturation is below optimal levels. Consider discussing with healthcare provider.";
pub const ELEVATED_TEMPERATURE_ADVICE: &str =
    "Body temperature is slightly elevated. Monitor for other symptoms.";
pub const FALL_ADVICE: &str =
    "Fall events detected in records. Consider environmental safety assessment.";
pub const ALL_NORMAL_ADVICE: &str =
    "All vitals appear within normal ranges. Continue regular monitoring.";

/// Rule-based care recommendations for a newest-first reading sequence
///
/// Vital checks look only at the most recent reading; absent vitals never
/// trigger advice. The fall check covers the whole sequence.
pub fn generate_recommendations(readings: &[Reading]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(latest) = readings.first() {
        if latest.heart_rate.is_some_and(|hr| hr > 100.0) {
            recommendations.push(ELEVATED_HEART_RATE_ADVICE.to_string());
        }
        if latest.spo2.is_some_and(|spo2| spo2 < 95.0) {
            recommendations.push(LOW_OXYGEN_ADVICE.to_string());
        }
        if latest.body_temp.is_some_and(|temp| temp > 37.5) {
            recommendations.push(ELEVATED_TEMPERATURE_ADVICE.to_string());
        }
    }

    if readings.iter().any(|r| r.fall_detected) {
        recommendations.push(FALL_ADVICE.to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(ALL_NORMAL_ADVICE.to_string());
    }

    recommendations
}
