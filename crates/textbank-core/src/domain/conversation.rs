//! Conversation (campaign contact) domain entity and status machine

use serde::{Deserialize, Serialize};
use textbank_shared::{AssignmentId, CampaignId, ConversationId};

/// Where a conversation sits in the texting workflow. The vocabulary is owned
/// by the wider platform; this library only reads the prior status and writes
/// the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageStatus {
    NeedsMessage,
    NeedsResponse,
    Convo,
    Messaged,
    Closed,
}

impl MessageStatus {
    /// Status after a message lands on the conversation: any inbound message
    /// demands a response; an outbound one turns a pending response into an
    /// open conversation, otherwise the contact is simply messaged.
    pub fn after_message(self, is_from_contact: bool) -> MessageStatus {
        if is_from_contact {
            MessageStatus::NeedsResponse
        } else if self == MessageStatus::NeedsResponse {
            MessageStatus::Convo
        } else {
            MessageStatus::Messaged
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::NeedsMessage => "needsMessage",
            MessageStatus::NeedsResponse => "needsResponse",
            MessageStatus::Convo => "convo",
            MessageStatus::Messaged => "messaged",
            MessageStatus::Closed => "closed",
        }
    }
}

/// The addressable message thread: one campaign contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub campaign_id: Option<CampaignId>,
    pub assignment_id: Option<AssignmentId>,
    pub message_status: MessageStatus,
    pub timezone_offset: Option<String>,
    pub cell: String,
    pub routing_id: Option<String>,
}

/// Active-conversation record returned by the external contact-identity
/// cache for a (cell, service, routing id) lookup. `provider_message_id` is
/// present only when the record came from the durable store, where it carries
/// the id of the conversation's most recent message.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactIdentity {
    pub conversation_id: ConversationId,
    pub assignment_id: Option<AssignmentId>,
    pub message_status: MessageStatus,
    pub timezone_offset: Option<String>,
    pub provider_message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_always_needs_response() {
        for prior in [
            MessageStatus::NeedsMessage,
            MessageStatus::NeedsResponse,
            MessageStatus::Convo,
            MessageStatus::Messaged,
            MessageStatus::Closed,
        ] {
            assert_eq!(prior.after_message(true), MessageStatus::NeedsResponse);
        }
    }

    #[test]
    fn outbound_transition_table() {
        assert_eq!(
            MessageStatus::NeedsResponse.after_message(false),
            MessageStatus::Convo
        );
        assert_eq!(
            MessageStatus::Convo.after_message(false),
            MessageStatus::Messaged
        );
        assert_eq!(
            MessageStatus::Messaged.after_message(false),
            MessageStatus::Messaged
        );
        assert_eq!(
            MessageStatus::NeedsMessage.after_message(false),
            MessageStatus::Messaged
        );
    }

    #[test]
    fn status_uses_platform_wire_names() {
        let encoded = serde_json::to_string(&MessageStatus::NeedsResponse).unwrap();
        assert_eq!(encoded, "\"needsResponse\"");
        let decoded: MessageStatus = serde_json::from_str("\"convo\"").unwrap();
        assert_eq!(decoded, MessageStatus::Convo);
        assert_eq!(MessageStatus::Closed.as_str(), "closed");
    }
}
