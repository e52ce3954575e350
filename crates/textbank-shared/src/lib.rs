//! # Textbank Shared
//!
//! Shared configuration, telemetry, constants, and utilities for the
//! textbank campaign-texting platform.

pub mod config;
pub mod constants;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use config::{AppConfig, CacheSettings, DatabaseSettings};
pub use types::*;
