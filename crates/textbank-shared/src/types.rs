//! Common types

/// Durable identity of a conversation (campaign contact).
pub type ConversationId = i64;

/// Durable identity of a campaign.
pub type CampaignId = i64;

/// Durable identity of a texter assignment.
pub type AssignmentId = i64;

/// Durable identity of a texter (user).
pub type UserId = i64;

/// Durable identity of a message.
pub type MessageId = i64;
