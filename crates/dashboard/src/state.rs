//! Application state shared across handlers.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::config::DashboardConfig;
use crate::persistence::{JsonFileStore, SharedStore, StorageError};
use crate::seed;
use crate::services::{SessionStore, SettingsService};
use crate::store::DashboardStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The entity store and the
/// session store each have exactly one owner behind their own lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    store: RwLock<DashboardStore>,
    session: Mutex<SessionStore>,
    settings: SettingsService,
}

impl AppState {
    /// Build state from configuration: open the key-value backend, seed the
    /// entity store and apply any previously saved settings.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the state file exists but cannot be read.
    pub fn new(config: DashboardConfig) -> Result<Self, StorageError> {
        let kv = match &config.state_path {
            Some(path) => SharedStore::new(JsonFileStore::open(path)?),
            None => SharedStore::memory(),
        };
        Self::with_store(config, kv, seed::store(Utc::now()))
    }

    /// Build state around an existing backend and entity store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    pub fn with_store(
        config: DashboardConfig,
        kv: SharedStore,
        mut store: DashboardStore,
    ) -> Result<Self, StorageError> {
        let session = SessionStore::load(kv.clone())?;
        let settings = SettingsService::new(
            kv,
            config.settings_save_timeout,
            config.settings_save_retries,
        );

        if let Some(saved) = settings.load()? {
            // `load` only returns validated settings
            if let Err(e) = store.replace_settings(saved) {
                tracing::warn!(error = %e, "Ignoring saved settings");
            }
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store: RwLock::new(store),
                session: Mutex::new(session),
                settings,
            }),
        })
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// The entity store.
    #[must_use]
    pub fn store(&self) -> &RwLock<DashboardStore> {
        &self.inner.store
    }

    /// The session and onboarding store.
    #[must_use]
    pub fn session(&self) -> &Mutex<SessionStore> {
        &self.inner.session
    }

    /// The settings persistence service.
    #[must_use]
    pub fn settings(&self) -> &SettingsService {
        &self.inner.settings
    }

    /// Flush session state to the backend. Called once on shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects a write.
    pub async fn flush(&self) -> Result<(), StorageError> {
        self.inner.session.lock().await.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::StoreSettings;

    #[tokio::test]
    async fn test_saved_settings_are_applied_on_startup() {
        let kv = SharedStore::memory();
        let saved = StoreSettings {
            store_name: "Tienda Sol".to_string(),
            ..StoreSettings::default()
        };
        SettingsService::new(kv.clone(), Duration::from_secs(1), 0)
            .save(&saved)
            .await
            .unwrap();

        let state =
            AppState::with_store(DashboardConfig::default(), kv, DashboardStore::default()).unwrap();
        assert_eq!(state.store().read().await.settings(), &saved);
    }

    #[tokio::test]
    async fn test_new_without_state_path_seeds_memory_state() {
        let state = AppState::new(DashboardConfig::default()).unwrap();
        assert_eq!(state.store().read().await.list_conversations("").len(), 3);
        assert!(state.session().lock().await.current_user().is_none());
        state.flush().await.unwrap();
    }
}
