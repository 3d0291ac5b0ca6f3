//! Store settings handlers.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use crate::error::AppError;
use crate::models::StoreSettings;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/settings", get(show).put(update))
}

/// Current store settings.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<StoreSettings> {
    Json(state.store().read().await.settings().clone())
}

/// Replace the store settings.
///
/// The record is persisted first; the in-memory copy only changes once the
/// save has succeeded. The store write lock is held across both steps so
/// concurrent updates persist and apply in the same order.
///
/// # Errors
///
/// Returns 422 if the settings are rejected, 500 if storage fails and 504
/// if every save attempt timed out.
#[instrument(skip_all, fields(store_name = %body.store_name))]
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<StoreSettings>,
) -> Result<Json<StoreSettings>, AppError> {
    let mut store = state.store().write().await;
    state.settings().save(&body).await?;
    store.replace_settings(body.clone())?;
    Ok(Json(body))
}
