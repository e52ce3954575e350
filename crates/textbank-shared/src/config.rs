//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_CACHE_MAX_CONNECTIONS, DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DB_MIN_CONNECTIONS,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    /// Redis connection url. Thread caching is disabled entirely when unset;
    /// every cache-touching path then degrades to the durable store.
    pub url: Option<String>,
    /// Prepended to every cache key, empty by default. Must match across all
    /// processes sharing one cache backend.
    pub key_prefix: String,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("database.max_connections", i64::from(DEFAULT_DB_MAX_CONNECTIONS))?
            .set_default("database.min_connections", i64::from(DEFAULT_DB_MIN_CONNECTIONS))?
            .set_default("cache.key_prefix", "")?
            .set_default("cache.max_connections", i64::from(DEFAULT_CACHE_MAX_CONNECTIONS))?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}
