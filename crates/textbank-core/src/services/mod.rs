//! Domain services (business logic)

pub mod thread_service;

pub use thread_service::{SaveOutcome, ThreadSelector, ThreadService};
