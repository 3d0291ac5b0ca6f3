//! Conversation inbox models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use merchify_core::{ConversationId, DealStatus, MessageId, MessageSender};

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique within the owning conversation.
    pub id: MessageId,
    /// Message text; may contain emoji.
    pub content: String,
    /// Who wrote it.
    pub sender: MessageSender,
    /// When it was sent.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message with a freshly generated ID.
    #[must_use]
    pub fn new(content: impl Into<String>, sender: MessageSender, timestamp: DateTime<Utc>) -> Self {
        Self::with_id(MessageId::generate(), content, sender, timestamp)
    }

    /// Create a message with a known ID (seed data).
    #[must_use]
    pub fn with_id(
        id: impl Into<MessageId>,
        content: impl Into<String>,
        sender: MessageSender,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            sender,
            timestamp,
        }
    }
}

/// A WhatsApp conversation with one customer.
///
/// Messages are kept in append order, which is also chronological order. The
/// `last_message`/`timestamp` pair always mirrors the most recently appended
/// message, so the message list is private and only grows through
/// [`Conversation::push_message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub phone_number: String,
    pub customer_name: String,
    last_message: String,
    timestamp: DateTime<Utc>,
    pub status: DealStatus,
    pub unread: u32,
    messages: Vec<Message>,
}

impl Conversation {
    /// Start an empty conversation.
    ///
    /// `started_at` stands in for the last-activity timestamp until the first
    /// message arrives.
    #[must_use]
    pub fn new(
        id: impl Into<ConversationId>,
        phone_number: impl Into<String>,
        customer_name: impl Into<String>,
        status: DealStatus,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            phone_number: phone_number.into(),
            customer_name: customer_name.into(),
            last_message: String::new(),
            timestamp: started_at,
            status,
            unread: 0,
            messages: Vec::new(),
        }
    }

    /// Set the unread counter.
    #[must_use]
    pub const fn with_unread(mut self, unread: u32) -> Self {
        self.unread = unread;
        self
    }

    /// Append a batch of messages in order.
    #[must_use]
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        for message in messages {
            self.push_message(message);
        }
        self
    }

    /// Append a message and refresh the last-message summary.
    pub fn push_message(&mut self, message: Message) {
        self.last_message.clone_from(&message.content);
        self.timestamp = message.timestamp;
        self.messages.push(message);
    }

    /// Text of the most recent message.
    #[must_use]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Time of the most recent activity.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Messages in chronological order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether the customer name or phone number matches a search term.
    ///
    /// Names match case-insensitively; phone numbers match literally.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        term.is_empty()
            || self
                .customer_name
                .to_lowercase()
                .contains(&term.to_lowercase())
            || self.phone_number.contains(term)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn conversation() -> Conversation {
        let now = Utc::now();
        Conversation::new(
            "1",
            "+51 999 888 777",
            "María García",
            DealStatus::Negotiation,
            now - Duration::hours(1),
        )
    }

    #[test]
    fn test_push_updates_summary() {
        let now = Utc::now();
        let mut conv = conversation();
        conv.push_message(Message::with_id("m1", "Hola 👋", MessageSender::Customer, now));

        assert_eq!(conv.last_message(), "Hola 👋");
        assert_eq!(conv.timestamp(), now);
        assert_eq!(conv.messages().len(), 1);
    }

    #[test]
    fn test_empty_conversation_uses_start_time() {
        let conv = conversation();
        assert_eq!(conv.last_message(), "");
        assert!(conv.messages().is_empty());
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let conv = conversation();
        assert!(conv.matches("garcía"));
        assert!(conv.matches("GARCÍA"));
        assert!(conv.matches(""));
        assert!(!conv.matches("lópez"));
    }

    #[test]
    fn test_matches_phone_literally() {
        let conv = conversation();
        assert!(conv.matches("888 777"));
        assert!(!conv.matches("888777"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(conversation()).expect("serialize");
        assert_eq!(json["customerName"], "María García");
        assert_eq!(json["phoneNumber"], "+51 999 888 777");
        assert_eq!(json["status"], "negotiation");
        assert!(json["messages"].as_array().is_some_and(Vec::is_empty));
    }
}
