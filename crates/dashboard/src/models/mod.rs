//! Domain models for the dashboard.
//!
//! Entities are plain data; the collections that own them live in
//! [`crate::store`], and persistence of the session-scoped ones in
//! [`crate::services`].

pub mod conversation;
pub mod onboarding;
pub mod order;
pub mod product;
pub mod settings;
pub mod user;
pub mod validation;

pub use conversation::{Conversation, Message};
pub use onboarding::{AnswerOption, OnboardingAnswers, OnboardingField};
pub use order::{LineItem, Order};
pub use product::{NewProduct, Product, ProductPatch};
pub use settings::StoreSettings;
pub use user::User;
pub use validation::ValidationError;
