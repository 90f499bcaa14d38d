use crate::entities::Reading;
use crate::services::statistics::average;

/// Heart-rate change, in bpm, that must be exceeded before a trend is reported
pub const TREND_THRESHOLD_BPM: f64 = 5.0;

/// Number of readings in each comparison window
pub const TREND_WINDOW: usize = 5;

/// Returned when fewer than two readings are available
pub const INSUFFICIENT_TREND_DATA: &str = "Not enough data for trend analysis";

pub const TREND_UPWARD: &str = "Heart rate has been trending upward";
pub const TREND_DOWNWARD: &str = "Heart rate has been trending downward";
pub const TREND_STABLE: &str = "Heart rate has been relatively stable";

/// Describe the heart-rate trend of a newest-first reading sequence
///
/// Compares the mean of the first `TREND_WINDOW` readings against the mean of
/// the last `TREND_WINDOW`. With fewer than twice that many readings the two
/// windows share samples.
pub fn analyze_trend(readings: &[Reading]) -> String {
    let n = readings.len();
    if n < 2 {
        return INSUFFICIENT_TREND_DATA.to_string();
    }

    let recent = &readings[..TREND_WINDOW.min(n)];
    let older = &readings[n.saturating_sub(TREND_WINDOW)..];

    let recent_hr = average(recent.iter().map(|r| r.heart_rate));
    let older_hr = average(older.iter().map(|r| r.heart_rate));

    let statement = if recent_hr > older_hr + TREND_THRESHOLD_BPM {
        TREND_UPWARD
    } else if recent_hr < older_hr - TREND_THRESHOLD_BPM {
        TREND_DOWNWARD
    } else {
        TREND_STABLE
    };

    statement.to_string()
}
