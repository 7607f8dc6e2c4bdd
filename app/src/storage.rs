//! Session storage — a small key-value layer standing in for browser
//! local storage.
//!
//! Values are JSON-serialized objects under fixed keys, with no versioning
//! or migration. The file-backed implementation keeps all keys in one JSON
//! document on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Key holding the signed-in user
pub const USER_KEY: &str = "beet-guru-user";

/// Key holding the retailer's selected customer
pub const SELECTED_CUSTOMER_KEY: &str = "beet-guru-selected-customer";

/// Browser-local-storage-shaped persistence
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// File-backed storage: the whole key space is one JSON object on disk.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> AppResult<BTreeMap<String, Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| AppError::Storage(format!("corrupt session file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(AppError::Storage(e.to_string())),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Storage(e.to_string()))?;
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|e| AppError::Storage(e.to_string()))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions
#[derive(Default)]
pub struct InMemoryStorage {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for InMemoryStorage {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("poisoned session store".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("poisoned session store".into()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("poisoned session store".into()))?;
        entries.remove(key);
        Ok(())
    }
}
