//! # Textbank Core
//!
//! Domain entities, services, and repository traits for the textbank
//! message-thread cache: conversation identity resolution, a time-bounded
//! per-conversation thread cache in front of the durable store, inbound
//! dedup, and the conversation-status state machine.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use services::{SaveOutcome, ThreadSelector, ThreadService};
