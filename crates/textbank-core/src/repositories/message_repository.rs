//! Durable message store trait (port)

use async_trait::async_trait;
use textbank_shared::{CampaignId, ConversationId};

use crate::domain::Message;
use crate::error::DomainError;

/// Which slice of the durable message table to read. Exactly one of the two
/// ids is expected to be meaningful; the conversation id takes precedence
/// when both are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageSelector {
    pub conversation_id: Option<ConversationId>,
    pub campaign_id: Option<CampaignId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// All matching messages ordered by `created_at` ascending. The opaque
    /// provider-response payload is not selected in bulk reads.
    async fn query_messages(&self, selector: &MessageSelector)
        -> Result<Vec<Message>, DomainError>;

    /// Persist a single record: update when `is_update`, otherwise insert.
    /// Returns the stored row, carrying the fresh durable id on insert.
    async fn persist(&self, message: &Message, is_update: bool) -> Result<Message, DomainError>;
}
