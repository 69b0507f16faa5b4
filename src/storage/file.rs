//! File-backed storage

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::{Storage, StorageError, StorageKey};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a sibling temporary file which is then renamed over the target, so a
/// crash mid-write leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();

        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    /// Directory the values live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|source| StorageError::Io { key, source })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io { key, source })
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }
}
