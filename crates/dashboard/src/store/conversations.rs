//! Conversation inbox operations.

use chrono::{DateTime, Utc};

use merchify_core::{ConversationId, MessageSender};

use super::{DashboardStore, StoreError};
use crate::models::validation::require_text;
use crate::models::{Conversation, Message};

impl DashboardStore {
    /// Conversations whose customer name (ignoring case) or phone number
    /// (literally) contains `term`, in stored order. An empty term returns
    /// everything.
    #[must_use]
    pub fn list_conversations(&self, term: &str) -> Vec<&Conversation> {
        self.conversations.iter().filter(|c| c.matches(term)).collect()
    }

    /// Look up one conversation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no conversation has this ID.
    pub fn get_conversation(&self, id: &ConversationId) -> Result<&Conversation, StoreError> {
        self.conversations
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::not_found("conversation", id))
    }

    /// Append a message stamped with the current time.
    ///
    /// # Errors
    ///
    /// See [`DashboardStore::append_message_at`].
    pub fn append_message(
        &mut self,
        id: &ConversationId,
        content: &str,
        sender: MessageSender,
    ) -> Result<Message, StoreError> {
        self.append_message_at(id, content, sender, Utc::now())
    }

    /// Append a message to the end of a conversation and update its
    /// last-message summary. Messages are never re-sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if `content` is blank and
    /// [`StoreError::NotFound`] if the conversation does not exist.
    pub fn append_message_at(
        &mut self,
        id: &ConversationId,
        content: &str,
        sender: MessageSender,
        at: DateTime<Utc>,
    ) -> Result<Message, StoreError> {
        require_text("content", content)?;

        let conversation = self
            .conversations
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::not_found("conversation", id))?;

        let message = Message::new(content, sender, at);
        conversation.push_message(message.clone());

        tracing::info!(
            conversation_id = %id,
            message_id = %message.id,
            sender = ?sender,
            total_messages = conversation.messages().len(),
            "Message appended"
        );
        Ok(message)
    }
}
