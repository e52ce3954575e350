//! Contact-identity cache trait (port)

use async_trait::async_trait;

use crate::domain::{ContactIdentity, Conversation, MessageStatus};
use crate::error::DomainError;

/// External cache mapping (cell, service, routing id) to the active
/// conversation, owned by the campaign-contact subsystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactIdentityCache: Send + Sync {
    /// Active conversation for the addressing triple, or `None` when no
    /// thread is live for it. With `cache_only` the lookup must answer from
    /// its cache alone; otherwise it may fall back to a durable query.
    async fn lookup_by_cell(
        &self,
        cell: &str,
        service: &str,
        routing_id: &str,
        cache_only: bool,
    ) -> Result<Option<ContactIdentity>, DomainError>;

    /// Record the conversation's new status (and activity timestamp).
    async fn update_status(
        &self,
        conversation: &Conversation,
        new_status: MessageStatus,
    ) -> Result<(), DomainError>;
}
