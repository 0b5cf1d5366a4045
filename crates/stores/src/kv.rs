use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum KeyValueStoreError {
    #[error("Invalid key. key: '{0}'")]
    InvalidKey(String),
    #[error("IO error. key: '{key}', cause: {cause}")]
    Io { key: String, cause: std::io::Error },
}

/// Named string blobs, a value that was `set` is returned unchanged by `get`.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
    /// Removing a key that is not present is not an error.
    fn remove(&mut self, key: &str) -> Result<(), KeyValueStoreError>;
}

/// One file per key, in a single directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    directory: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
        }
    }

    fn build_path(&self, key: &str) -> Result<PathBuf, KeyValueStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(KeyValueStoreError::InvalidKey(key.to_string()));
        }

        let mut path = self.directory.clone();
        path.push(key);
        Ok(path)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let path = self.build_path(key)?;
        trace!("Reading value. path: {}", path.display());

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(cause) if cause.kind() == ErrorKind::NotFound => Ok(None),
            Err(cause) => Err(KeyValueStoreError::Io {
                key: key.to_string(),
                cause,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let path = self.build_path(key)?;
        debug!("Writing value. path: {}, length: {}", path.display(), value.len());

        fs::create_dir_all(&self.directory)
            .and_then(|_| fs::write(&path, value))
            .map_err(|cause| KeyValueStoreError::Io {
                key: key.to_string(),
                cause,
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), KeyValueStoreError> {
        let path = self.build_path(key)?;
        debug!("Removing value. path: {}", path.display());

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(cause) if cause.kind() == ErrorKind::NotFound => Ok(()),
            Err(cause) => Err(KeyValueStoreError::Io {
                key: key.to_string(),
                cause,
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.entries
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), KeyValueStoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
