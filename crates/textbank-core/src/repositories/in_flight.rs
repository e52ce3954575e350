//! In-flight send tracker trait (port)

use async_trait::async_trait;
use textbank_shared::{CampaignId, ConversationId, UserId};

use crate::error::DomainError;

/// External tracker of outbound sends awaiting completion, owned by the
/// assignment subsystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InFlightTracker: Send + Sync {
    /// Release the conversation's in-flight slot for the campaign. When
    /// `texter_user_id` is given, the texter's last-activity timestamp is
    /// refreshed as well.
    async fn pop_in_flight(
        &self,
        campaign_id: CampaignId,
        conversation_id: ConversationId,
        texter_user_id: Option<UserId>,
    ) -> Result<(), DomainError>;
}
