//! localStorage backend for persisted view preferences.
//!
//! Browsers may refuse storage entirely (private mode, disabled cookies) or
//! reject writes (quota exceeded). Both surface as [`StorageError`] and the
//! store treats them as best-effort failures.

use super::dom;
use crate::core::error::StorageError;
use crate::core::store::KeyValueStorage;

/// [`KeyValueStorage`] over `window.localStorage`.
///
/// The storage handle is looked up on every call so a storage that becomes
/// available later (or goes away) is picked up.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
        storage.get_item(key).map_err(|_| StorageError::ReadFailed)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::SaveFailed)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
        storage
            .remove_item(key)
            .map_err(|_| StorageError::RemoveFailed)
    }
}
