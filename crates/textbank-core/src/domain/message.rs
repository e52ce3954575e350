//! Message domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use textbank_shared::{AssignmentId, ConversationId, MessageId, UserId};

/// One inbound or outbound communication unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Durable-store identity, absent until persisted.
    pub id: Option<MessageId>,
    pub conversation_id: Option<ConversationId>,
    pub assignment_id: Option<AssignmentId>,
    /// Sending texter; absent on inbound messages.
    pub user_id: Option<UserId>,
    pub contact_number: String,
    pub text: String,
    /// Upstream provider name.
    pub service: Option<String>,
    /// Provider messaging-service identifier the message was routed through.
    pub routing_id: Option<String>,
    /// Provider-assigned message identity, used to deduplicate inbound
    /// messages delivered more than once.
    pub provider_message_id: Option<String>,
    pub is_from_contact: bool,
    /// Raw provider payload. Skipped by serde, so cached threads never carry
    /// it and reads never fabricate it.
    #[serde(skip)]
    pub service_response: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Copy of this message with the conversation/assignment backfilled from
    /// a resolved contact identity wherever the message did not already carry
    /// them.
    pub fn with_thread(
        mut self,
        conversation_id: ConversationId,
        assignment_id: Option<AssignmentId>,
    ) -> Self {
        self.conversation_id = self.conversation_id.or(Some(conversation_id));
        self.assignment_id = self.assignment_id.or(assignment_id);
        self
    }
}
