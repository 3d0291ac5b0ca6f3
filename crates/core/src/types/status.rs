//! Status enums shared by conversations and orders.

use serde::{Deserialize, Serialize};

/// Sales stage of a conversation or order.
///
/// Both conversations and orders move through the same four stages. The set is
/// closed: display code matches on it exhaustively, so adding a stage forces
/// every label mapping to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    /// Contact made, no negotiation or purchase commitment yet.
    #[default]
    Lead,
    /// Actively being discussed toward a sale.
    Negotiation,
    /// Purchase committed.
    Confirmed,
    /// Dropped by either side.
    Cancelled,
}

impl DealStatus {
    /// All statuses in pipeline order.
    pub const ALL: [Self; 4] = [
        Self::Lead,
        Self::Negotiation,
        Self::Confirmed,
        Self::Cancelled,
    ];

    /// Whether the deal is still open (lead or negotiation).
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Lead | Self::Negotiation)
    }

    /// The wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Negotiation => "negotiation",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DealStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lead" => Ok(Self::Lead),
            "negotiation" => Ok(Self::Negotiation),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid deal status: {s}")),
        }
    }
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    /// The shopper on the other end of the chat.
    Customer,
    /// The store's assistant (human agent or bot).
    #[default]
    Assistant,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for status in DealStatus::ALL {
            assert_eq!(status.as_str().parse::<DealStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!("pending".parse::<DealStatus>().is_err());
    }

    #[test]
    fn test_active_statuses() {
        assert!(DealStatus::Lead.is_active());
        assert!(DealStatus::Negotiation.is_active());
        assert!(!DealStatus::Confirmed.is_active());
        assert!(!DealStatus::Cancelled.is_active());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&DealStatus::Negotiation).unwrap();
        assert_eq!(json, "\"negotiation\"");
        let sender: MessageSender = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(sender, MessageSender::Customer);
    }
}
