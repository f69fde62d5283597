//! services/app/src/adapters/file_storage.rs
//!
//! This module contains the file storage adapter, the concrete implementation
//! of the `StorageService` port from the `core` crate. It maps each storage
//! key to one JSON record file under a data directory, the closest desktop
//! analog of a browser's per-origin local storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use eduvista_core::ports::{StorageError, StorageService};

/// A storage adapter keeping one `<key>.json` file per key.
///
/// Writes replace the whole file, so two processes sharing a data directory
/// behave like two tabs over the same medium: last write wins.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates an adapter rooted at `root`. The directory is created lazily
    /// on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

fn unavailable(action: &str, path: &Path, err: &std::io::Error) -> StorageError {
    StorageError::Unavailable(format!("{action} {}: {err}", path.display()))
}

impl StorageService for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(unavailable("read", &path, &err)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|err| unavailable("mkdir", &self.root, &err))?;
        let path = self.record_path(key);
        fs::write(&path, value).map_err(|err| unavailable("write", &path, &err))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(unavailable("remove", &path, &err)),
        }
    }
}
