use crate::entities::Statistics;

/// Score of a person with every vital in range and no falls
pub const MAX_HEALTH_SCORE: u8 = 100;

/// Heart-rate penalty: severe outside 50–110 bpm, moderate outside 60–100 bpm
fn heart_rate_penalty(avg: f64) -> u32 {
    if avg < 50.0 || avg > 110.0 {
        20
    } else if avg < 60.0 || avg > 100.0 {
        10
    } else {
        0
    }
}

/// SpO2 penalty: severe below 90 %, moderate below 95 %
fn spo2_penalty(avg: f64) -> u32 {
    if avg < 90.0 {
        25
    } else if avg < 95.0 {
        15
    } else {
        0
    }
}

/// Temperature penalty: severe outside 35–38 °C, moderate outside 36–37.5 °C
fn temperature_penalty(avg: f64) -> u32 {
    if avg < 35.0 || avg > 38.0 {
        20
    } else if avg < 36.0 || avg > 37.5 {
        10
    } else {
        0
    }
}

fn fall_penalty(fall_events: usize) -> u32 {
    if fall_events > 2 {
        30
    } else if fall_events > 0 {
        15
    } else {
        0
    }
}

/// Rule-based health score in `0..=100`
///
/// Starts at 100 and subtracts one penalty per vital; the result is clamped
/// at 0.
pub fn calculate_health_score(stats: &Statistics) -> u8 {
    let penalty = heart_rate_penalty(stats.avg_heart_rate)
        + spo2_penalty(stats.avg_spo2)
        + temperature_penalty(stats.avg_temp)
        + fall_penalty(stats.fall_events);

    u32::from(MAX_HEALTH_SCORE).saturating_sub(penalty) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(hr: f64, spo2: f64, temp: f64, falls: usize) -> Statistics {
        Statistics {
            avg_heart_rate: hr,
            avg_spo2: spo2,
            avg_temp: temp,
            avg_bp: 120.0,
            fall_events: falls,
        }
    }

    #[test]
    fn test_perfect_score() {
        assert_eq!(calculate_health_score(&stats(70.0, 98.0, 36.5, 0)), 100);
    }

    #[test]
    fn test_heart_rate_bands() {
        assert_eq!(calculate_health_score(&stats(45.0, 98.0, 36.5, 0)), 80);
        assert_eq!(calculate_health_score(&stats(115.0, 98.0, 36.5, 0)), 80);
        assert_eq!(calculate_health_score(&stats(55.0, 98.0, 36.5, 0)), 90);
        assert_eq!(calculate_health_score(&stats(105.0, 98.0, 36.5, 0)), 90);
        assert_eq!(calculate_health_score(&stats(50.0, 98.0, 36.5, 0)), 90);
        assert_eq!(calculate_health_score(&stats(110.0, 98.0, 36.5, 0)), 90);
        assert_eq!(calculate_health_score(&stats(60.0, 98.0, 36.5, 0)), 100);
        assert_eq!(calculate_health_score(&stats(100.0, 98.0, 36.5, 0)), 100);
    }

    #[test]
    fn test_spo2_bands() {
        assert_eq!(calculate_health_score(&stats(70.0, 88.0, 36.5, 0)), 75);
        assert_eq!(calculate_health_score(&stats(70.0, 92.0, 36.5, 0)), 85);
        assert_eq!(calculate_health_score(&stats(70.0, 95.0, 36.5, 0)), 100);
    }

    #[test]
    fn test_temperature_bands() {
        assert_eq!(calculate_health_score(&stats(70.0, 98.0, 34.0, 0)), 80);
        assert_eq!(calculate_health_score(&stats(70.0, 98.0, 38.5, 0)), 80);
        assert_eq!(calculate_health_score(&stats(70.0, 98.0, 35.5, 0)), 90);
        assert_eq!(calculate_health_score(&stats(70.0, 98.0, 37.8, 0)), 90);
        assert_eq!(calculate_health_score(&stats(70.0, 98.0, 37.5, 0)), 100);
    }

    #[test]
    fn test_fall_bands() {
        assert_eq!(calculate_health_score(&stats(70.0, 98.0, 36.5, 1)), 85);
        assert_eq!(calculate_health_score(&stats(70.0, 98.0, 36.5, 2)), 85);
        assert_eq!(calculate_health_score(&stats(70.0, 98.0, 36.5, 3)), 70);
    }

    #[test]
    fn test_penalties_add_up() {
        // -10 (hr moderate) -15 (spo2 moderate) -10 (temp moderate) -15 (one fall)
        assert_eq!(calculate_health_score(&stats(105.0, 93.0, 37.8, 1)), 50);
    }

    #[test]
    fn test_adversarial_inputs_stay_in_range() {
        assert_eq!(calculate_health_score(&stats(-40.0, -5.0, 100.0, 1000)), 5);
        // NaN compares false against every band edge
        assert_eq!(calculate_health_score(&stats(f64::NAN, 98.0, 36.5, 0)), 100);

        let worst = stats(0.0, 0.0, 0.0, usize::MAX);
        assert_eq!(calculate_health_score(&worst), 5);
    }

    #[test]
    fn test_score_is_deterministic() {
        let s = stats(102.0, 94.0, 37.6, 2);
        assert_eq!(calculate_health_score(&s), calculate_health_score(&s));
    }
}
