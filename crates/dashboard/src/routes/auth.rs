//! Local profile sign-in handlers.
//!
//! Passwords are accepted and dropped without being checked. This is a
//! single-profile dashboard, not an authentication boundary.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

/// Login form body.
///
/// Implements `Debug` manually to redact the password.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration form body.
///
/// Implements `Debug` manually to redact the password.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// Who is signed in, and whether they still need onboarding.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: Option<User>,
    pub onboarding_complete: bool,
}

/// Sign in with an email address.
///
/// # Errors
///
/// Returns 422 if the email is malformed.
#[instrument(skip(state))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let password = SecretString::from(body.password);
    let user = state.session().lock().await.login(&body.email, &password).await?;
    Ok(Json(user))
}

/// Register a named user and sign in.
///
/// # Errors
///
/// Returns 422 if the email is malformed or the name is blank.
#[instrument(skip(state))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let password = SecretString::from(body.password);
    let user = state
        .session()
        .lock()
        .await
        .register(&body.email, &password, &body.name)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Sign out.
///
/// # Errors
///
/// Returns 500 if the session key cannot be removed.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session().lock().await.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The current user, if any.
#[instrument(skip(state))]
pub async fn me(State(state): State<AppState>) -> Json<MeResponse> {
    let session = state.session().lock().await;
    Json(MeResponse {
        user: session.current_user().cloned(),
        onboarding_complete: session.onboarding_complete(),
    })
}
