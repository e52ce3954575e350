// ============================================================================
// Textbank Infrastructure - Redis Thread Cache
// File: crates/textbank-infrastructure/src/cache/redis_thread_cache.rs
// ============================================================================
//! Redis-backed per-conversation thread cache.
//!
//! Threads live in a list per conversation, newest at the head (LPUSH on the
//! write path), expiring 24 hours after the last write. Reads reverse the
//! list back into chronological order at the boundary.

use async_trait::async_trait;
use deadpool_redis::redis;
use deadpool_redis::{Pool, PoolConfig, Runtime};
use tracing::{debug, error};

use textbank_core::domain::Message;
use textbank_core::error::DomainError;
use textbank_core::repositories::ThreadCache;
use textbank_shared::constants::THREAD_CACHE_TTL_SECS;
use textbank_shared::ConversationId;

use super::thread_cache_key;

pub fn create_redis_pool(url: &str, max_connections: u32) -> Result<Pool, DomainError> {
    let mut cfg = deadpool_redis::Config::from_url(url);
    cfg.pool = Some(PoolConfig::new(max_connections as usize));
    cfg.create_pool(Some(Runtime::Tokio1)).map_err(|e| {
        error!("Failed to create redis pool: {}", e);
        DomainError::Cache(e.to_string())
    })
}

pub struct RedisThreadCache {
    pool: Pool,
    key_prefix: String,
}

impl RedisThreadCache {
    pub fn new(pool: Pool, key_prefix: String) -> Self {
        Self { pool, key_prefix }
    }

    fn key(&self, conversation_id: ConversationId) -> String {
        thread_cache_key(&self.key_prefix, conversation_id)
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, DomainError> {
        self.pool.get().await.map_err(|e| {
            error!("Failed to get redis connection: {}", e);
            DomainError::Cache(e.to_string())
        })
    }
}

#[async_trait]
impl ThreadCache for RedisThreadCache {
    async fn read(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Option<Vec<Message>>, DomainError> {
        let key = self.key(conversation_id);
        let mut conn = self.connection().await?;
        let (exists, raw): (bool, Vec<String>) = redis::pipe()
            .exists(&key)
            .lrange(&key, 0, -1)
            .query_async(&mut conn)
            .await
            .map_err(|e| DomainError::Cache(e.to_string()))?;
        if !exists {
            return Ok(None);
        }
        // The list holds newest-first; present oldest-first to callers.
        let mut thread = Vec::with_capacity(raw.len());
        for payload in raw.into_iter().rev() {
            thread.push(serde_json::from_str(&payload)?);
        }
        debug!(
            "Read {} cached messages for conversation {}",
            thread.len(),
            conversation_id
        );
        Ok(Some(thread))
    }

    async fn write(
        &self,
        conversation_id: ConversationId,
        messages: &[Message],
        overwrite: bool,
    ) -> Result<(), DomainError> {
        if messages.is_empty() {
            return Ok(());
        }
        let key = self.key(conversation_id);
        // serde skips service_response, so the payload never enters the cache
        let payloads = messages
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.connection().await?;
        let mut pipe = redis::pipe();
        pipe.atomic();
        if overwrite {
            pipe.del(&key);
        }
        pipe.lpush(&key, payloads);
        pipe.expire(&key, THREAD_CACHE_TTL_SECS);
        let _: () = pipe
            .query_async(&mut conn)
            .await
            .map_err(|e| DomainError::Cache(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self, conversation_id: ConversationId) -> Result<(), DomainError> {
        let key = self.key(conversation_id);
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("DEL")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| DomainError::Cache(e.to_string()))?;
        Ok(())
    }
}
