//! Onboarding wizard handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::models::OnboardingField;
use crate::services::{OnboardingState, StepOutcome};
use crate::state::AppState;

/// Build the onboarding router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/onboarding", get(show))
        .route("/api/onboarding/answers", put(answer))
        .route("/api/onboarding/next", post(next))
        .route("/api/onboarding/previous", post(previous))
}

/// One answer for one field.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub field: OnboardingField,
    pub value: String,
}

/// Result of advancing, with the state after the move.
#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    #[serde(flatten)]
    pub outcome: StepOutcome,
    pub state: OnboardingState,
}

/// Current progress and question.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<OnboardingState> {
    Json(state.session().lock().await.onboarding_state())
}

/// Record an answer.
///
/// # Errors
///
/// Returns 422 for a blank value or one outside the field's options.
#[instrument(skip(state))]
pub async fn answer(
    State(state): State<AppState>,
    Json(body): Json<AnswerRequest>,
) -> Result<Json<OnboardingState>, AppError> {
    let mut session = state.session().lock().await;
    session.update_onboarding_answer(body.field, &body.value).await?;
    Ok(Json(session.onboarding_state()))
}

/// Advance to the next step, or complete onboarding on the last one.
///
/// # Errors
///
/// Returns 422 if the current step has not been answered.
#[instrument(skip(state))]
pub async fn next(State(state): State<AppState>) -> Result<Json<AdvanceResponse>, AppError> {
    let mut session = state.session().lock().await;
    let outcome = session.advance_onboarding_step().await?;
    Ok(Json(AdvanceResponse {
        outcome,
        state: session.onboarding_state(),
    }))
}

/// Go back one step.
///
/// # Errors
///
/// Returns 500 if the step cannot be persisted.
#[instrument(skip(state))]
pub async fn previous(State(state): State<AppState>) -> Result<Json<OnboardingState>, AppError> {
    let mut session = state.session().lock().await;
    session.previous_onboarding_step().await?;
    Ok(Json(session.onboarding_state()))
}
