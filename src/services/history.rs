//! Search history, persisted as a JSON array of `{id, name}` in a flat file.
//!
//! Reads never fail: a missing or corrupt file is treated as an empty list.
//! Writes rewrite the whole file and propagate I/O errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::City;

/// File-backed search history. Cloning shares the same file and lock.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Arc<Mutex<()>>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved cities, in insertion order.
    pub async fn list(&self) -> Vec<City> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Add a city unless one with the same name (case-insensitive) exists.
    /// Returns the stored entry either way.
    pub async fn add(&self, name: &str) -> Result<City, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("City name is required".to_string()));
        }

        let _guard = self.lock.lock().await;
        let mut cities = self.read().await;

        let wanted = name.to_lowercase();
        if let Some(existing) = cities.iter().find(|c| c.name.to_lowercase() == wanted) {
            return Ok(existing.clone());
        }

        let city = City {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };
        cities.push(city.clone());
        self.write(&cities).await?;

        tracing::debug!("Added '{}' to search history as {}", city.name, city.id);
        Ok(city)
    }

    /// Remove the city with `id`. Unknown ids leave the list unchanged.
    pub async fn remove(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut cities = self.read().await;
        let before = cities.len();
        cities.retain(|c| c.id != id);

        if cities.len() == before {
            tracing::debug!("No search history entry with id {}", id);
        }
        self.write(&cities).await
    }

    async fn read(&self) -> Vec<City> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(
                    "Could not read search history {}: {}, treating as empty",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!(
                "Could not parse search history {}: {}, treating as empty",
                self.path.display(),
                e
            );
            Vec::new()
        })
    }

    async fn write(&self, cities: &[City]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(cities)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("db").join("searchHistory.json"))
    }

    #[tokio::test]
    async fn test_missing_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("searchHistory.json");
        std::fs::write(&path, "{ not valid").unwrap();

        let store = HistoryStore::new(&path);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_creates_file_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let city = store.add("Berlin").await.unwrap();
        assert_eq!(city.name, "Berlin");
        assert!(Uuid::parse_str(&city.id).is_ok());

        let reopened = HistoryStore::new(store.path());
        assert_eq!(reopened.list().await, vec![city]);
    }

    #[tokio::test]
    async fn test_add_is_case_insensitive_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let first = store.add("Paris").await.unwrap();
        let again = store.add("  PARIS ").await.unwrap();
        assert_eq!(first, again);
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_blank_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(
            store.add("   ").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let oslo = store.add("Oslo").await.unwrap();
        let bern = store.add("Bern").await.unwrap();

        store.remove(&oslo.id).await.unwrap();
        assert_eq!(store.list().await, vec![bern.clone()]);

        // Unknown id is a no-op
        store.remove("does-not-exist").await.unwrap();
        assert_eq!(store.list().await, vec![bern]);
    }

    #[tokio::test]
    async fn test_file_is_pretty_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add("Rome").await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["name"], "Rome");
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let handles: Vec<_> = ["A", "B", "C", "D"]
            .into_iter()
            .map(|name| {
                let store = store.clone();
                tokio::spawn(async move { store.add(name).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        assert_eq!(store.list().await.len(), 4);
    }
}
