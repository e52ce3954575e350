//! No-op thread cache for deployments without a cache backend.

use async_trait::async_trait;

use textbank_core::domain::Message;
use textbank_core::error::DomainError;
use textbank_core::repositories::ThreadCache;
use textbank_shared::ConversationId;

/// Stands in for the Redis adapter when no backend is configured: every read
/// reports a cold cache and every write succeeds without doing anything, so
/// callers fall through to the durable store transparently.
pub struct NoopThreadCache;

#[async_trait]
impl ThreadCache for NoopThreadCache {
    async fn read(&self, _: ConversationId) -> Result<Option<Vec<Message>>, DomainError> {
        Ok(None)
    }

    async fn write(
        &self,
        _: ConversationId,
        _: &[Message],
        _: bool,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn clear(&self, _: ConversationId) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_operation_reports_a_cold_cache() {
        let cache = NoopThreadCache;
        assert_eq!(cache.read(9).await.unwrap(), None);
        cache.write(9, &[], false).await.unwrap();
        cache.clear(9).await.unwrap();
    }
}
