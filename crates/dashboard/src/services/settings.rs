//! Store settings persistence.
//!
//! Each save attempt runs the write on the blocking pool under a timeout.
//! A timed-out attempt is abandoned if the write has not reached the backend
//! yet; otherwise the save waits for it, so a reported failure never lands
//! later. Failed or abandoned attempts are retried up to the configured count.

use std::time::Duration;

use thiserror::Error;
use tracing::instrument;

use crate::models::{StoreSettings, ValidationError};
use crate::persistence::{SharedStore, StorageError};

/// Key holding [`StoreSettings`] as JSON.
pub const SETTINGS_KEY: &str = "merchify_settings";

/// Errors from saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Every attempt ran past the per-attempt timeout before reaching the
    /// backend, so nothing was written.
    #[error("settings save timed out after {attempts} attempt(s)")]
    Timeout { attempts: u32 },
}

/// Saves and loads the settings record.
#[derive(Debug, Clone)]
pub struct SettingsService {
    kv: SharedStore,
    timeout: Duration,
    retries: u32,
}

impl SettingsService {
    /// `retries` is the number of extra attempts after the first one fails.
    #[must_use]
    pub const fn new(kv: SharedStore, timeout: Duration, retries: u32) -> Self {
        Self {
            kv,
            timeout,
            retries,
        }
    }

    /// Settings saved by a previous run.
    ///
    /// Malformed or invalid records are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the backend itself fails.
    pub fn load(&self) -> Result<Option<StoreSettings>, StorageError> {
        let Some(raw) = self.kv.get(SETTINGS_KEY)? else {
            return Ok(None);
        };
        let settings: StoreSettings = match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(key = SETTINGS_KEY, error = %e, "Ignoring malformed persisted value");
                return Ok(None);
            }
        };
        if let Err(e) = settings.validate() {
            tracing::warn!(key = SETTINGS_KEY, error = %e, "Ignoring invalid persisted settings");
            return Ok(None);
        }
        Ok(Some(settings))
    }

    /// Validate and persist `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Validation`] without writing anything if the
    /// settings are rejected. Otherwise, once every attempt has failed,
    /// returns the last attempt's error: [`SettingsError::Storage`] or
    /// [`SettingsError::Timeout`].
    #[instrument(skip_all, fields(store_name = %settings.store_name))]
    pub async fn save(&self, settings: &StoreSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        let json = serde_json::to_string(settings).map_err(StorageError::from)?;
        let attempts = self.retries.saturating_add(1);

        let mut last_error = SettingsError::Timeout { attempts: 0 };
        for attempt in 1..=attempts {
            let mut write = self.kv.spawn_set(SETTINGS_KEY.to_string(), json.clone());
            let timed = tokio::time::timeout(self.timeout, write.wait()).await;
            let result = match timed {
                Ok(result) => result,
                Err(_) => {
                    write.abandon();
                    let settled = write.wait().await;
                    if matches!(settled, Ok(true)) {
                        tracing::warn!(attempt, "Settings save finished after its timeout");
                    }
                    settled
                }
            };
            match result {
                Ok(true) => {
                    tracing::info!(attempt, "Store settings saved");
                    return Ok(());
                }
                Ok(false) => {
                    tracing::warn!(
                        attempt,
                        timeout_ms = self.timeout.as_millis(),
                        "Settings save timed out"
                    );
                    last_error = SettingsError::Timeout { attempts: attempt };
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Settings save failed");
                    last_error = SettingsError::Storage(e);
                }
            }
        }
        Err(last_error)
    }
}
