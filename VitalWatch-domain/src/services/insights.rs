use crate::entities::HealthCategory;

/// Categorize a health score the way the report view colours it
pub fn categorize_health_score(score: u8) -> HealthCategory {
    if score >= 80 {
        HealthCategory::Good
    } else if score >= 60 {
        HealthCategory::Fair
    } else {
        HealthCategory::NeedsAttention
    }
}
