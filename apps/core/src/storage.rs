//! Key-value persistence port.
//!
//! Scores and the mood log are persisted through [`KeyValueStore`], a synchronous
//! string-to-string interface. Nothing in `brain` touches storage; callers pass a store in.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::config::WellnessConfig;
use crate::error::AppError;
use crate::models::IntakeScore;

/// Key holding the latest [`IntakeScore`].
pub const INTAKE_SCORE_KEY: &str = "questionnaire_scores";
/// Key holding the JSON array of mood entries.
pub const MOOD_ENTRIES_KEY: &str = "mood_entries";

/// Durable string storage addressed by key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        (**self).remove(key)
    }
}

/// In-process store; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, AppError> {
        self.entries
            .lock()
            .map_err(|_| AppError::StorageUnavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Store writing one `<key>.json` file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The directory is created on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the configured data directory.
    pub fn from_config(config: &WellnessConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::Validation(format!("invalid storage key '{}'", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::StorageUnavailable(format!(
                "failed to read {:?}: {}",
                path, e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| {
            AppError::StorageUnavailable(format!("failed to create {:?}: {}", self.root, e))
        })?;
        fs::write(&path, value).map_err(|e| {
            AppError::StorageUnavailable(format!("failed to write {:?}: {}", path, e))
        })?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageUnavailable(format!(
                "failed to remove {:?}: {}",
                path, e
            ))),
        }
    }
}

/// Latest intake score, stored under [`INTAKE_SCORE_KEY`].
pub struct IntakeRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> IntakeRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrites any previously stored score.
    pub fn save(&self, score: &IntakeScore) -> Result<(), AppError> {
        let json = serde_json::to_string(score)?;
        self.store.set(INTAKE_SCORE_KEY, &json)?;
        info!(mood = score.mood.label(), "intake score saved");
        Ok(())
    }

    pub fn load(&self) -> Result<Option<IntakeScore>, AppError> {
        match self.store.get(INTAKE_SCORE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove(INTAKE_SCORE_KEY)
    }
}
