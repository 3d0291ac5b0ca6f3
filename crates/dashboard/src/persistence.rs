//! Key-value persistence for session, onboarding and settings state.
//!
//! Values are strings; callers serialize JSON themselves. Two backends:
//!
//! - [`MemoryStore`] - process-local map, used when no state path is set
//! - [`JsonFileStore`] - one JSON object on disk, rewritten on every write
//!
//! Both are reached through [`SharedStore`], the cloneable handle that the
//! session store and the settings service hold onto.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::task::JoinHandle;

/// Errors from a key-value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The blocking write task was cancelled or panicked.
    #[error("storage task failed: {0}")]
    Task(String),
}

/// A string key-value store.
pub trait KeyValueStore: Send {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Make every accepted write durable.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Process-local store. Contents are lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// Store backed by a single JSON object file.
///
/// The file is read once on open. Every write rewrites it through a sibling
/// temporary file and a rename, so a crash never leaves a half-written file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read and
    /// [`StorageError::Serialization`] if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "Opened state file");
        Ok(Self { path, values })
    }

    fn write_file(&self) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(&self.values)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.write_file()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.values.remove(key).is_some() {
            self.write_file()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.write_file()
    }
}

// =============================================================================
// SharedStore
// =============================================================================

/// Cloneable handle to one key-value backend.
///
/// Operations hold a blocking lock for the duration of a single backend
/// call; use [`SharedStore::set_blocking`] from async code that must not
/// stall the runtime.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Box<dyn KeyValueStore>>>,
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore").finish_non_exhaustive()
    }
}

impl SharedStore {
    #[must_use]
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        let boxed: Box<dyn KeyValueStore> = Box::new(store);
        Self {
            inner: Arc::new(Mutex::new(boxed)),
        }
    }

    /// A handle to a fresh [`MemoryStore`].
    #[must_use]
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    fn with<T>(
        &self,
        f: impl FnOnce(&mut dyn KeyValueStore) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        f(&mut **guard)
    }

    /// # Errors
    ///
    /// See [`KeyValueStore::get`].
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with(|store| store.get(key))
    }

    /// # Errors
    ///
    /// See [`KeyValueStore::set`].
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with(|store| store.set(key, value))
    }

    /// # Errors
    ///
    /// See [`KeyValueStore::remove`].
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with(|store| store.remove(key))
    }

    /// # Errors
    ///
    /// See [`KeyValueStore::flush`].
    pub fn flush(&self) -> Result<(), StorageError> {
        self.with(|store| store.flush())
    }

    /// Run a write on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or [`StorageError::Task`] if the
    /// blocking task did not complete.
    pub async fn set_blocking(&self, key: String, value: String) -> Result<(), StorageError> {
        self.spawn_set(key, value).wait().await.map(drop)
    }

    /// Remove a key on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or [`StorageError::Task`] if the
    /// blocking task did not complete.
    pub async fn remove_blocking(&self, key: String) -> Result<(), StorageError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.remove(&key))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }

    /// Start a write on the blocking thread pool and return a handle to it.
    ///
    /// The write can be abandoned until it has taken the backend lock. Once
    /// it has, it always runs to completion.
    #[must_use]
    pub fn spawn_set(&self, key: String, value: String) -> PendingWrite {
        let store = self.clone();
        let abandoned = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&abandoned);
        let handle = tokio::task::spawn_blocking(move || {
            store.with(|backend| {
                if flag.load(Ordering::SeqCst) {
                    return Ok(false);
                }
                backend.set(&key, &value).map(|()| true)
            })
        });
        PendingWrite { handle, abandoned }
    }
}

/// A write running on the blocking thread pool.
#[derive(Debug)]
pub struct PendingWrite {
    handle: JoinHandle<Result<bool, StorageError>>,
    abandoned: Arc<AtomicBool>,
}

impl PendingWrite {
    /// Ask the write not to start. Has no effect once it holds the backend.
    pub fn abandon(&self) {
        self.abandoned.store(true, Ordering::SeqCst);
    }

    /// Wait for the task to settle.
    ///
    /// Returns `Ok(true)` if the value was written and `Ok(false)` if the
    /// write was abandoned before reaching the backend. Must not be called
    /// again after it has returned.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or [`StorageError::Task`] if the
    /// blocking task panicked.
    pub async fn wait(&mut self) -> Result<bool, StorageError> {
        (&mut self.handle)
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("merchify-{}", uuid::Uuid::new_v4().simple()))
            .join("state.json")
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let path = temp_path();
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("merchify_onboarding_complete", "true").unwrap();
            store.set("gone", "x").unwrap();
            store.remove("gone").unwrap();
        }
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.get("merchify_onboarding_complete").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(store.get("gone").unwrap(), None);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_json_file_store_missing_file_is_empty() {
        let store = JsonFileStore::open(temp_path()).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_rejects_garbage() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StorageError::Serialization(_))
        ));
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_shared_store_clones_see_same_backend() {
        let a = SharedStore::memory();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));

        b.set_blocking("k".to_string(), "w".to_string())
            .await
            .unwrap();
        assert_eq!(a.get("k").unwrap().as_deref(), Some("w"));

        b.remove_blocking("k".to_string()).await.unwrap();
        assert_eq!(a.get("k").unwrap(), None);
    }

    #[tokio::test]
    async fn test_abandoned_write_never_lands() {
        let kv = SharedStore::memory();
        let guard = kv.inner.lock().unwrap();
        let mut write = kv.spawn_set("k".to_string(), "v".to_string());
        write.abandon();
        drop(guard);

        assert!(!write.wait().await.unwrap());
        assert_eq!(kv.get("k").unwrap(), None);
    }

    #[tokio::test]
    async fn test_started_write_completes() {
        let kv = SharedStore::memory();
        let mut write = kv.spawn_set("k".to_string(), "v".to_string());
        assert!(write.wait().await.unwrap());
        write.abandon();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));
    }
}
