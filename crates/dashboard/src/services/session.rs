//! Session and onboarding profile store.
//!
//! [`SessionStore::load`] reads the persisted keys once. Every mutation then
//! writes through to the key-value store on the blocking pool and only
//! updates the in-memory copy once the write succeeded.
//! [`SessionStore::flush`] rewrites everything on shutdown.
//!
//! There is no credential check anywhere in here: the dashboard runs as a
//! single local profile and the login form only picks which user is shown.

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use merchify_core::Email;

use crate::models::validation::require_text;
use crate::models::{OnboardingAnswers, User, ValidationError};
use crate::persistence::{SharedStore, StorageError};

/// Key holding the signed-in user as JSON.
pub const USER_KEY: &str = "merchify_user";
/// Key holding [`OnboardingAnswers`] as JSON.
pub const ONBOARDING_KEY: &str = "merchify_onboarding";
/// Key holding `"true"` once onboarding has been completed.
pub const ONBOARDING_COMPLETE_KEY: &str = "merchify_onboarding_complete";

/// Errors from session and onboarding operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Current user plus onboarding progress.
#[derive(Debug)]
pub struct SessionStore {
    kv: SharedStore,
    user: Option<User>,
    pub(super) onboarding: OnboardingAnswers,
    pub(super) onboarding_complete: bool,
}

impl SessionStore {
    /// Read the session keys from `kv`.
    ///
    /// Absent keys mean "signed out", default answers and "not complete".
    /// Malformed values are logged and treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the backend itself fails.
    pub fn load(kv: SharedStore) -> Result<Self, StorageError> {
        let user = read_json::<User>(&kv, USER_KEY)?;
        let onboarding = read_json::<OnboardingAnswers>(&kv, ONBOARDING_KEY)?.unwrap_or_default();
        let onboarding_complete = match kv.get(ONBOARDING_COMPLETE_KEY)?.as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                tracing::warn!(
                    key = ONBOARDING_COMPLETE_KEY,
                    value = other,
                    "Ignoring malformed persisted flag"
                );
                false
            }
        };

        tracing::info!(
            signed_in = user.is_some(),
            onboarding_step = onboarding.current_step,
            onboarding_complete,
            "Session loaded"
        );

        Ok(Self {
            kv,
            user,
            onboarding,
            onboarding_complete,
        })
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether onboarding has been finished.
    #[must_use]
    pub const fn onboarding_complete(&self) -> bool {
        self.onboarding_complete
    }

    /// Sign in as the user named by `email`. The password is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] if `email` does not parse and
    /// [`SessionError::Storage`] if the user cannot be persisted.
    #[instrument(skip(self, _password))]
    pub async fn login(
        &mut self,
        email: &str,
        _password: &SecretString,
    ) -> Result<User, SessionError> {
        let email = Email::parse(email).map_err(ValidationError::from)?;
        let name = email.local_part().to_owned();
        self.sign_in(User::synthesize(email, name)).await
    }

    /// Create and sign in a user with a display name.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] if `email` does not parse or
    /// `name` is blank, and [`SessionError::Storage`] if the user cannot be
    /// persisted.
    #[instrument(skip(self, _password))]
    pub async fn register(
        &mut self,
        email: &str,
        _password: &SecretString,
        name: &str,
    ) -> Result<User, SessionError> {
        require_text("name", name)?;
        let email = Email::parse(email).map_err(ValidationError::from)?;
        self.sign_in(User::synthesize(email, name.trim())).await
    }

    async fn sign_in(&mut self, user: User) -> Result<User, SessionError> {
        write_json(&self.kv, USER_KEY, &user).await?;
        tracing::info!(user_id = %user.id, "User signed in");
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Clear the signed-in user. Onboarding progress is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the key cannot be removed.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.kv.remove_blocking(USER_KEY.to_string()).await?;
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "User signed out");
        }
        Ok(())
    }

    pub(super) async fn persist_onboarding(
        &self,
        answers: &OnboardingAnswers,
    ) -> Result<(), StorageError> {
        write_json(&self.kv, ONBOARDING_KEY, answers).await
    }

    pub(super) async fn persist_onboarding_complete(
        &self,
        complete: bool,
    ) -> Result<(), StorageError> {
        self.kv
            .set_blocking(ONBOARDING_COMPLETE_KEY.to_string(), flag(complete).to_string())
            .await
    }

    /// Write every session key and flush the backend.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any write fails.
    pub fn flush(&self) -> Result<(), StorageError> {
        match &self.user {
            Some(user) => self.kv.set(USER_KEY, &serde_json::to_string(user)?)?,
            None => self.kv.remove(USER_KEY)?,
        }
        self.kv.set(ONBOARDING_KEY, &serde_json::to_string(&self.onboarding)?)?;
        self.kv.set(ONBOARDING_COMPLETE_KEY, flag(self.onboarding_complete))?;
        self.kv.flush()?;
        tracing::debug!("Session flushed");
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(kv: &SharedStore, key: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = kv.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed persisted value");
            Ok(None)
        }
    }
}

async fn write_json<T: Serialize>(
    kv: &SharedStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    kv.set_blocking(key.to_string(), json).await
}

const fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn password() -> SecretString {
        SecretString::from("whatever")
    }

    #[test]
    fn test_empty_store_loads_signed_out() {
        let session = SessionStore::load(SharedStore::memory()).unwrap();
        assert!(session.current_user().is_none());
        assert!(!session.onboarding_complete());
        assert_eq!(session.onboarding, OnboardingAnswers::default());
    }

    #[tokio::test]
    async fn test_login_synthesizes_user_from_email() {
        let kv = SharedStore::memory();
        let mut session = SessionStore::load(kv.clone()).unwrap();
        let user = session.login("maria@tienda.pe", &password()).await.unwrap();

        assert_eq!(user.name, "maria");
        assert_eq!(user.email.as_str(), "maria@tienda.pe");
        assert_eq!(session.current_user(), Some(&user));
        assert!(kv.get(USER_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_email() {
        let mut session = SessionStore::load(SharedStore::memory()).unwrap();
        let err = session.login("not-an-email", &password()).await.unwrap_err();
        assert!(matches!(err, SessionError::Validation(ValidationError::Email(_))));
        assert!(session.current_user().is_none());
    }

    #[tokio::test]
    async fn test_register_requires_name() {
        let mut session = SessionStore::load(SharedStore::memory()).unwrap();
        let err = session
            .register("ana@tienda.pe", &password(), "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(ValidationError::Required("name"))));

        let user = session
            .register("ana@tienda.pe", &password(), "Ana Martínez")
            .await
            .unwrap();
        assert_eq!(user.name, "Ana Martínez");
    }

    #[tokio::test]
    async fn test_user_survives_reload_and_logout_clears_it() {
        let kv = SharedStore::memory();
        let mut session = SessionStore::load(kv.clone()).unwrap();
        let user = session.login("carlos@tienda.pe", &password()).await.unwrap();

        let reloaded = SessionStore::load(kv.clone()).unwrap();
        assert_eq!(reloaded.current_user(), Some(&user));

        session.logout().await.unwrap();
        assert!(session.current_user().is_none());
        assert!(SessionStore::load(kv).unwrap().current_user().is_none());
    }

    #[test]
    fn test_malformed_keys_are_ignored() {
        let kv = SharedStore::memory();
        kv.set(USER_KEY, "{not json").unwrap();
        kv.set(ONBOARDING_KEY, "[1, 2]").unwrap();
        kv.set(ONBOARDING_COMPLETE_KEY, "yes").unwrap();

        let session = SessionStore::load(kv).unwrap();
        assert!(session.current_user().is_none());
        assert_eq!(session.onboarding, OnboardingAnswers::default());
        assert!(!session.onboarding_complete());
    }

    #[test]
    fn test_flush_writes_every_key() {
        let kv = SharedStore::memory();
        let session = SessionStore::load(kv.clone()).unwrap();
        session.flush().unwrap();

        assert_eq!(kv.get(ONBOARDING_COMPLETE_KEY).unwrap().as_deref(), Some("false"));
        let answers: OnboardingAnswers =
            serde_json::from_str(&kv.get(ONBOARDING_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(answers, OnboardingAnswers::default());
        assert!(kv.get(USER_KEY).unwrap().is_none());
    }
}
