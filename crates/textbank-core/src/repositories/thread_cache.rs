//! Thread cache trait (port)

use async_trait::async_trait;
use textbank_shared::ConversationId;

use crate::domain::Message;
use crate::error::DomainError;

/// Per-conversation cached message thread.
///
/// Entry absence means "unknown", never "empty": a `None` read must send the
/// caller to the durable store. Implementations are selected at construction
/// (active backend or no-op), so call sites never test for cache presence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreadCache: Send + Sync {
    /// The cached thread in chronological (oldest-first) order, or `None`
    /// when no entry exists.
    async fn read(&self, conversation_id: ConversationId)
        -> Result<Option<Vec<Message>>, DomainError>;

    /// Store messages (given oldest-first) for a conversation. `overwrite`
    /// drops any existing entry first (full rebuild); otherwise the messages
    /// are added to the existing thread (incremental append). Every write
    /// resets the entry's expiration.
    async fn write(
        &self,
        conversation_id: ConversationId,
        messages: &[Message],
        overwrite: bool,
    ) -> Result<(), DomainError>;

    /// Drop the conversation's entry unconditionally.
    async fn clear(&self, conversation_id: ConversationId) -> Result<(), DomainError>;
}
