//! Six-step onboarding progression.
//!
//! Each step is bound to one [`OnboardingField`]. Moving forward requires an
//! answer for the current step; finishing the last step sets the durable
//! completion flag. Every change is written through immediately.

use serde::Serialize;
use tracing::instrument;

use super::session::{SessionError, SessionStore};
use crate::models::{AnswerOption, OnboardingAnswers, OnboardingField, ValidationError};

/// Number of onboarding steps.
pub const TOTAL_STEPS: usize = OnboardingField::STEPS.len();

/// The question shown for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPrompt {
    pub field: OnboardingField,
    pub question: &'static str,
    /// Empty for free-text steps.
    pub options: &'static [AnswerOption],
}

impl From<OnboardingField> for StepPrompt {
    fn from(field: OnboardingField) -> Self {
        Self {
            field,
            question: field.question(),
            options: field.options(),
        }
    }
}

/// Snapshot of onboarding progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    pub answers: OnboardingAnswers,
    pub current_step: usize,
    pub total_steps: usize,
    /// `(current_step + 1) / total_steps`, rounded to a whole percent.
    pub progress_percent: usize,
    pub complete: bool,
    pub prompt: Option<StepPrompt>,
}

/// Result of moving forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum StepOutcome {
    /// Moved to this step.
    Advanced { step: usize },
    /// The last step was answered; onboarding is done.
    Completed,
}

const fn progress_percent(step: usize) -> usize {
    // Round half up without leaving integers.
    ((step + 1) * 200 + TOTAL_STEPS) / (2 * TOTAL_STEPS)
}

impl SessionStore {
    /// Current answers, step and prompt.
    #[must_use]
    pub fn onboarding_state(&self) -> OnboardingState {
        let step = self.onboarding.current_step.min(TOTAL_STEPS - 1);
        OnboardingState {
            answers: self.onboarding.clone(),
            current_step: step,
            total_steps: TOTAL_STEPS,
            progress_percent: progress_percent(step),
            complete: self.onboarding_complete,
            prompt: OnboardingField::for_step(step).map(StepPrompt::from),
        }
    }

    /// Record an answer for any field.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] for a blank value or one outside
    /// the field's options, and [`SessionError::Storage`] if the answers
    /// cannot be persisted.
    #[instrument(skip(self))]
    pub async fn update_onboarding_answer(
        &mut self,
        field: OnboardingField,
        value: &str,
    ) -> Result<(), SessionError> {
        let mut answers = self.onboarding.clone();
        answers.set(field, value)?;
        self.persist_onboarding(&answers).await?;
        self.onboarding = answers;
        tracing::info!(field = field.key(), "Onboarding answer recorded");
        Ok(())
    }

    /// Move to the next step, or complete onboarding from the last one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] if the current step has no
    /// answer and [`SessionError::Storage`] if the move cannot be persisted;
    /// nothing changes in either case.
    #[instrument(skip(self))]
    pub async fn advance_onboarding_step(&mut self) -> Result<StepOutcome, SessionError> {
        let step = self.onboarding.current_step.min(TOTAL_STEPS - 1);
        let field = OnboardingField::for_step(step).ok_or_else(|| ValidationError::Invalid {
            field: "currentStep",
            reason: format!("no step {step}"),
        })?;
        if !self.onboarding.is_answered(field) {
            return Err(ValidationError::Required(field.key()).into());
        }

        if step + 1 < TOTAL_STEPS {
            let mut answers = self.onboarding.clone();
            answers.current_step = step + 1;
            self.persist_onboarding(&answers).await?;
            self.onboarding = answers;
            tracing::info!(step = step + 1, "Onboarding advanced");
            Ok(StepOutcome::Advanced { step: step + 1 })
        } else {
            self.persist_onboarding_complete(true).await?;
            self.onboarding_complete = true;
            tracing::info!("Onboarding completed");
            Ok(StepOutcome::Completed)
        }
    }

    /// Move back one step. Staying on the first step is not an error.
    ///
    /// Returns the step after the move.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the step cannot be persisted.
    #[instrument(skip(self))]
    pub async fn previous_onboarding_step(&mut self) -> Result<usize, SessionError> {
        let step = self.onboarding.current_step.min(TOTAL_STEPS - 1);
        if step > 0 {
            let mut answers = self.onboarding.clone();
            answers.current_step = step - 1;
            self.persist_onboarding(&answers).await?;
            self.onboarding = answers;
        }
        Ok(self.onboarding.current_step)
    }
}
