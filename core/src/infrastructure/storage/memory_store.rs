use std::{collections::HashMap, sync::RwLock};

use crate::domain::{common::entities::app_errors::CoreError, storage::ports::KeyValueStore};

/// Process-local store, used in tests and when no data directory is wanted.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let values = self
            .values
            .read()
            .map_err(|_| CoreError::StorageUnavailable("store lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| CoreError::StorageUnavailable("store lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| CoreError::StorageUnavailable("store lock poisoned".to_string()))?;
        values.remove(key);
        Ok(())
    }
}
