//! Domain entities for the textbank message-thread cache.

pub mod conversation;
pub mod message;

// Re-export all entities and enums
pub use conversation::{ContactIdentity, Conversation, MessageStatus};
pub use message::Message;
