//! In-memory storage

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use super::{Storage, StorageError, StorageKey};

/// Process-local storage, used in tests and for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<StorageKey, String>>, StorageError> {
        self.values.lock().map_err(|_poisoned| StorageError::Poisoned)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.values()?.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.values()?.insert(key, value.to_string());

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.values()?.remove(&key);

        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.values()?.clear();

        Ok(())
    }
}
