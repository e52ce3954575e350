//! Thread-cache adapters (Redis-backed and no-op)

use std::sync::Arc;

use textbank_core::repositories::ThreadCache;
use textbank_core::DomainError;
use textbank_shared::{CacheSettings, ConversationId};

pub mod noop_thread_cache;
pub mod redis_thread_cache;

pub use noop_thread_cache::NoopThreadCache;
pub use redis_thread_cache::RedisThreadCache;

/// Cache key for a conversation's thread. Must be derived identically by
/// every process sharing the cache backend.
pub fn thread_cache_key(prefix: &str, conversation_id: ConversationId) -> String {
    format!("{}messages-{}", prefix, conversation_id)
}

/// Select the thread-cache implementation from configuration: the Redis
/// adapter when a backend url is configured, the no-op adapter otherwise.
/// Callers hold a `ThreadCache` either way and never branch on presence.
pub fn thread_cache_from_config(
    settings: &CacheSettings,
) -> Result<Arc<dyn ThreadCache>, DomainError> {
    match &settings.url {
        Some(url) => {
            let pool = redis_thread_cache::create_redis_pool(url, settings.max_connections)?;
            Ok(Arc::new(RedisThreadCache::new(
                pool,
                settings.key_prefix.clone(),
            )))
        }
        None => Ok(Arc::new(NoopThreadCache)),
    }
}
