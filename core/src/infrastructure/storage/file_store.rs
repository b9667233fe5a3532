use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::error;

use crate::domain::{common::entities::app_errors::CoreError, storage::ports::KeyValueStore};

/// Durable local store: one JSON document per key inside `root`.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// crash never leaves a half-written record behind.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            error!("Failed to create data directory {}: {}", root.display(), e);
            unavailable(e)
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read {}: {}", key, e);
                Err(unavailable(e))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let target = self.path_for(key);
        let staging = target.with_extension("json.tmp");

        fs::write(&staging, value)
            .and_then(|()| fs::rename(&staging, &target))
            .map_err(|e| {
                error!("Failed to write {}: {}", key, e);
                let _ = fs::remove_file(&staging);
                unavailable(e)
            })
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Failed to remove {}: {}", key, e);
                Err(unavailable(e))
            }
        }
    }
}

fn unavailable(e: io::Error) -> CoreError {
    CoreError::StorageUnavailable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        store.set("caltrax:user_1:profile", r#"{"a":1}"#).unwrap();

        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("caltrax:user_1:profile").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[test]
    fn missing_key_reads_as_none_and_removes_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();

        assert_eq!(store.get("nope").unwrap(), None);
        assert!(store.remove("nope").is_ok());
    }

    #[test]
    fn overwrite_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();

        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn keys_cannot_escape_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();

        store.set("../../etc/evil", "x").unwrap();

        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn unwritable_directory_reports_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("data")).unwrap();
        fs::remove_dir_all(store.root()).unwrap();

        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, CoreError::StorageUnavailable(_)));
    }
}
