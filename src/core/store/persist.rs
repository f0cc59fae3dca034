//! Local persistence adapter.
//!
//! Stores view preferences as JSON under a namespaced key
//! (`orbsurv:<key>`). Persistence is best-effort: failures are logged and
//! swallowed so callers never have to handle them.

use std::rc::Rc;

use serde::{Serialize, de::DeserializeOwned};

use super::backend::KeyValueStorage;
use crate::config::STORAGE_NAMESPACE;
use crate::core::error::StorageError;
use crate::utils::log;

/// Namespaced JSON preferences over a [`KeyValueStorage`].
#[derive(Clone)]
pub struct LocalPrefs {
    storage: Rc<dyn KeyValueStorage>,
}

impl LocalPrefs {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Full storage key for a preference.
    pub fn namespaced(key: &str) -> String {
        format!("{}{}", STORAGE_NAMESPACE, key)
    }

    /// Serialize and store `value`. Logs and returns on failure.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = self.try_save(key, value) {
            log::warn(&format!("store: unable to persist to localStorage: {}", err));
        }
    }

    /// Read and parse `key`, returning `fallback` if absent or on any error.
    pub fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_read(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(err) => {
                log::warn(&format!("store: unable to read from localStorage: {}", err));
                fallback
            }
        }
    }

    /// Remove `key`. Logs and returns on failure.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.storage.remove_item(&Self::namespaced(key)) {
            log::warn(&format!("store: unable to remove from localStorage: {}", err));
        }
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;
        self.storage.set_item(&Self::namespaced(key), &json)
    }

    fn try_read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(json) = self.storage.get_item(&Self::namespaced(key))? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::ParseFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::testing::MemoryStorage;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Filters {
        label: String,
        confidence: f64,
    }

    #[test]
    fn test_save_uses_namespace() {
        let storage = Rc::new(MemoryStorage::default());
        let prefs = LocalPrefs::new(storage.clone());

        prefs.save("gallery:filter", "Person");
        assert_eq!(
            storage.raw("orbsurv:gallery:filter"),
            Some("\"Person\"".to_string())
        );
    }

    #[test]
    fn test_read_round_trips_struct() {
        let prefs = LocalPrefs::new(Rc::new(MemoryStorage::default()));
        let filters = Filters {
            label: "Vehicle".to_string(),
            confidence: 0.75,
        };
        prefs.save("ai:filters", &filters);

        let fallback = Filters {
            label: "all".to_string(),
            confidence: 0.6,
        };
        assert_eq!(prefs.read("ai:filters", fallback), filters);
    }

    #[test]
    fn test_read_missing_returns_fallback() {
        let prefs = LocalPrefs::new(Rc::new(MemoryStorage::default()));
        assert!(!prefs.read("ai:memoryCollapsed", false));
        assert_eq!(prefs.read("calendar:view", "month".to_string()), "month");
    }

    #[test]
    fn test_read_corrupt_returns_fallback() {
        let storage = Rc::new(MemoryStorage::default());
        storage.insert_raw("orbsurv:calendar:selected", "{not json");
        let prefs = LocalPrefs::new(storage);

        let selected: Option<String> = prefs.read("calendar:selected", None);
        assert_eq!(selected, None);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let storage = Rc::new(MemoryStorage::default());
        storage.set_failing(true);
        let prefs = LocalPrefs::new(storage.clone());

        prefs.save("gallery:view", "list");
        prefs.remove("gallery:view");
        assert_eq!(prefs.read("gallery:view", "grid".to_string()), "grid");

        storage.set_failing(false);
        assert_eq!(storage.raw("orbsurv:gallery:view"), None);
    }

    #[test]
    fn test_remove() {
        let storage = Rc::new(MemoryStorage::default());
        let prefs = LocalPrefs::new(storage.clone());
        prefs.save("calendar:view", "week");
        prefs.remove("calendar:view");
        assert_eq!(storage.raw("orbsurv:calendar:view"), None);
    }
}
