//! # Textbank Infrastructure
//!
//! Database and cache implementations (adapters).

pub mod cache;
pub mod database;

pub use cache::{thread_cache_from_config, NoopThreadCache, RedisThreadCache};
pub use database::{create_pool, run_migrations, PgMessageRepository};
