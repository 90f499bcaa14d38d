use std::sync::{Arc, Mutex};
use std::collections::HashMap;

use crate::models::reading::HealthReading;
use super::errors::RepositoryError;

/// In-memory storage implementation for vitals readings
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    /// Readings keyed by id
    readings: Arc<Mutex<HashMap<String, HealthReading>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            readings: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a reading in memory. The reading must carry an id.
    pub async fn store_reading(&self, reading: &HealthReading) -> Result<HealthReading, RepositoryError> {
        let id = reading.id.clone().ok_or_else(|| {
            RepositoryError::Validation("reading must have an id to be stored".to_string())
        })?;

        let mut store = self.readings.lock()?;
        store.insert(id, reading.clone());
        Ok(reading.clone())
    }

    /// Get readings newest first, optionally capped at `limit`
    ///
    /// Timestamps are stored in normalized UTC RFC 3339 form, so the
    /// lexicographic order is the chronological one. Equal timestamps are
    /// ordered by descending id.
    pub async fn get_recent(&self, limit: Option<usize>) -> Result<Vec<HealthReading>, RepositoryError> {
        let store = self.readings.lock()?;

        let mut readings: Vec<HealthReading> = store.values().cloned().collect();
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));

        let limit = limit.unwrap_or(readings.len());
        readings.truncate(limit);

        Ok(readings)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(id: &str, timestamp: &str) -> HealthReading {
        HealthReading {
            id: Some(id.to_string()),
            timestamp: timestamp.to_string(),
            heart_rate: Some(70.0),
            spo2: None,
            body_temp: None,
            blood_pressure: None,
            fall_detected: false,
        }
    }

    #[tokio::test]
    async fn test_get_recent_is_newest_first() {
        let storage = InMemoryStorage::new();
        storage.store_reading(&reading("a", "2024-05-01T08:00:00.000Z")).await.unwrap();
        storage.store_reading(&reading("b", "2024-05-01T10:00:00.000Z")).await.unwrap();
        storage.store_reading(&reading("c", "2024-05-01T09:00:00.000Z")).await.unwrap();

        let readings = storage.get_recent(None).await.unwrap();
        let ids: Vec<_> = readings.iter().filter_map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let limited = storage.get_recent(Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_store_requires_id() {
        let storage = InMemoryStorage::new();
        let mut without_id = reading("x", "2024-05-01T08:00:00.000Z");
        without_id.id = None;

        let result = storage.store_reading(&without_id).await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
        assert!(storage.get_recent(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_equal_timestamps_have_stable_order() {
        let storage = InMemoryStorage::new();
        for id in ["m", "z", "a", "k"] {
            storage.store_reading(&reading(id, "2024-05-01T08:00:00.000Z")).await.unwrap();
        }
        storage.store_reading(&reading("b", "2024-05-01T09:00:00.000Z")).await.unwrap();

        for _ in 0..5 {
            let readings = storage.get_recent(None).await.unwrap();
            let ids: Vec<_> = readings.iter().filter_map(|r| r.id.as_deref()).collect();
            assert_eq!(ids, vec!["b", "z", "m", "k", "a"]);
        }
    }
}
