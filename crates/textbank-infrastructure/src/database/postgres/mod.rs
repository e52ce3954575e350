//! PostgreSQL repository implementations

pub mod message_repo_impl;

pub use message_repo_impl::PgMessageRepository;
