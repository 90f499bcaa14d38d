use crate::entities::Statistics;

pub const ELEVATED_HEART_RATE: &str = "Elevated heart rate";
pub const LOW_HEART_RATE: &str = "Low heart rate";
pub const LOW_OXYGEN_SATURATION: &str = "Low oxygen saturation";
pub const ELEVATED_BODY_TEMPERATURE: &str = "Elevated body temperature";
pub const FALL_INCIDENTS: &str = "Fall incidents detected";
pub const HIGH_BLOOD_PRESSURE: &str = "High blood pressure";

/// Risk factors implied by aggregate statistics
///
/// Rules are checked in a fixed order and every rule that holds adds its
/// label. Returns an empty list when no rule fires.
pub fn identify_risk_factors(stats: &Statistics) -> Vec<String> {
    let mut risks = Vec::new();

    if stats.avg_heart_rate > 100.0 {
        risks.push(ELEVATED_HEART_RATE.to_string());
    }
    if stats.avg_heart_rate < 60.0 {
        risks.push(LOW_HEART_RATE.to_string());
    }
    if stats.avg_spo2 < 95.0 {
        risks.push(LOW_OXYGEN_SATURATION.to_string());
    }
    if stats.avg_temp > 37.5 {
        risks.push(ELEVATED_BODY_TEMPERATURE.to_string());
    }
    if stats.fall_events > 0 {
        risks.push(FALL_INCIDENTS.to_string());
    }
    if stats.avg_bp > 140.0 {
        risks.push(HIGH_BLOOD_PRESSURE.to_string());
    }

    risks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_stats() -> Statistics {
        Statistics {
            avg_heart_rate: 72.0,
            avg_spo2: 98.0,
            avg_temp: 36.6,
            avg_bp: 120.0,
            fall_events: 0,
        }
    }

    #[test]
    fn test_no_risks_is_empty() {
        assert!(identify_risk_factors(&normal_stats()).is_empty());
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let stats = Statistics {
            avg_heart_rate: 120.0,
            avg_spo2: 90.0,
            avg_temp: 38.2,
            avg_bp: 160.0,
            fall_events: 2,
        };

        assert_eq!(
            identify_risk_factors(&stats),
            vec![
                ELEVATED_HEART_RATE,
                LOW_OXYGEN_SATURATION,
                ELEVATED_BODY_TEMPERATURE,
                FALL_INCIDENTS,
                HIGH_BLOOD_PRESSURE,
            ]
        );
    }

    #[test]
    fn test_low_heart_rate_precedes_oxygen() {
        let stats = Statistics {
            avg_heart_rate: 45.0,
            avg_spo2: 93.0,
            ..normal_stats()
        };
        assert_eq!(identify_risk_factors(&stats), vec![LOW_HEART_RATE, LOW_OXYGEN_SATURATION]);
    }

    #[test]
    fn test_boundaries_are_strict() {
        let stats = Statistics {
            avg_heart_rate: 100.0,
            avg_spo2: 95.0,
            avg_temp: 37.5,
            avg_bp: 140.0,
            fall_events: 0,
        };
        assert!(identify_risk_factors(&stats).is_empty());

        let stats = Statistics {
            avg_heart_rate: 60.0,
            ..stats
        };
        assert!(identify_risk_factors(&stats).is_empty());
    }

    #[test]
    fn test_missing_vitals_average_to_zero_and_read_as_low() {
        // No usable heart-rate or SpO2 samples
        let stats = Statistics {
            avg_heart_rate: 0.0,
            avg_spo2: 0.0,
            ..normal_stats()
        };
        assert_eq!(identify_risk_factors(&stats), vec![LOW_HEART_RATE, LOW_OXYGEN_SATURATION]);
    }
}
