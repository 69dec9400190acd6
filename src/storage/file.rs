//! File-backed storage — one file per key under a data directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::storage::Storage;

/// Directory name under the platform data directory.
const APP_DIR: &str = "safedeal";

/// Stores each key as a plain-text file in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store under an explicit directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform-local data directory
    /// (`~/.local/share/safedeal` on Linux), falling back to a relative
    /// `.safedeal` directory when the platform reports none.
    pub fn default_location() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".safedeal"));
        Self { dir: base.join(APP_DIR) }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.get("safedeal_access_token").unwrap().is_none());

        store.set("safedeal_access_token", "tok-123").unwrap();
        assert_eq!(
            store.get("safedeal_access_token").unwrap().as_deref(),
            Some("tok-123")
        );

        store.remove("safedeal_access_token").unwrap();
        assert!(store.get("safedeal_access_token").unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.remove("safedeal_theme").unwrap();
    }

    #[test]
    fn test_set_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("deeper"));
        store.set("safedeal_theme", "dark").unwrap();
        assert_eq!(store.get("safedeal_theme").unwrap().as_deref(), Some("dark"));
    }
}
