//! Signed-in user model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use merchify_core::{Email, UserId};

/// Namespace for deriving stable user IDs from email addresses.
const USER_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6d65_7263_6869_6679_7573_6572_0000_0001);

/// The current user of this dashboard profile.
///
/// Users are synthesized locally from the login form; there is no account
/// authority behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}

impl User {
    /// Build a user whose ID is a pure function of the email address.
    #[must_use]
    pub fn synthesize(email: Email, name: impl Into<String>) -> Self {
        let id = Uuid::new_v5(&USER_ID_NAMESPACE, email.as_str().as_bytes());
        Self {
            id: UserId::new(id.simple().to_string()),
            email,
            name: name.into(),
        }
    }
}
