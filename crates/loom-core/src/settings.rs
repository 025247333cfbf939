//! Explicit key-value settings store
//!
//! Presentation-adjacent state (pane ratios, voice profiles, schedule
//! overrides) lives here instead of as implicit global state: loaded once
//! at startup, written through to the backend on every change, and kept
//! outside the graph-consistency core.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Settings persistence failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The backing store failed
    #[error("settings backend error: {0}")]
    Backend(String),
}

/// Persistence boundary for settings
///
/// Implementations are provided by the storage collaborator; the in-memory
/// [`MemoryBackend`] covers tests and ephemeral sessions.
pub trait SettingsBackend: Send + Sync {
    /// Load the full key set
    ///
    /// # Errors
    /// [`SettingsError`] when the backing store cannot be read.
    fn load(&self) -> Result<HashMap<String, serde_json::Value>, SettingsError>;

    /// Persist one key
    ///
    /// # Errors
    /// [`SettingsError`] when the write fails.
    fn persist(&self, key: &str, value: &serde_json::Value) -> Result<(), SettingsError>;

    /// Remove one key
    ///
    /// # Errors
    /// [`SettingsError`] when the removal fails.
    fn remove(&self, key: &str) -> Result<(), SettingsError>;
}

/// In-memory settings backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryBackend {
    /// Create an empty backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with entries
    #[must_use]
    pub fn with_entries(entries: HashMap<String, serde_json::Value>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl SettingsBackend for MemoryBackend {
    fn load(&self) -> Result<HashMap<String, serde_json::Value>, SettingsError> {
        Ok(self.entries.lock().clone())
    }

    fn persist(&self, key: &str, value: &serde_json::Value) -> Result<(), SettingsError> {
        self.entries.lock().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Write-through settings store
///
/// Lifecycle: [`SettingsStore::load`] at startup reads the backend once;
/// every [`set`](SettingsStore::set) writes through to the backend before
/// updating the cache, so a crash never loses an acknowledged change.
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
    cache: RwLock<HashMap<String, serde_json::Value>>,
}

impl SettingsStore {
    /// Load the store from its backend
    ///
    /// # Errors
    /// [`SettingsError`] when the initial read fails.
    pub fn load(backend: Arc<dyn SettingsBackend>) -> Result<Self, SettingsError> {
        let cache = backend.load()?;
        tracing::debug!(keys = cache.len(), "settings loaded");
        Ok(Self {
            backend,
            cache: RwLock::new(cache),
        })
    }

    /// Current value of a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.cache.read().get(key).cloned()
    }

    /// Set a key, writing through to the backend
    ///
    /// # Errors
    /// [`SettingsError`] when the backend write fails; the cache is left
    /// unchanged in that case.
    pub fn set(&self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        self.backend.persist(key, &value)?;
        self.cache.write().insert(key.to_string(), value);
        Ok(())
    }

    /// Remove a key, writing through to the backend
    ///
    /// # Errors
    /// [`SettingsError`] when the backend removal fails.
    pub fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key)?;
        self.cache.write().remove(key);
        Ok(())
    }

    /// All known keys
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.cache.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("keys", &self.cache.read().len())
            .finish_non_exhaustive()
    }
}
