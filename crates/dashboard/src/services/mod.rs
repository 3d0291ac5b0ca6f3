//! Stateful services layered over the key-value store.
//!
//! # Services
//!
//! - `session` - current user and onboarding progress, loaded once and written through
//! - `onboarding` - six-step onboarding progression on top of the session
//! - `settings` - store settings persistence with per-attempt timeout and retry

pub mod onboarding;
pub mod session;
pub mod settings;

pub use onboarding::{OnboardingState, StepOutcome, StepPrompt};
pub use session::{SessionError, SessionStore};
pub use settings::{SettingsError, SettingsService};
