// ============================================================================
// Textbank Core - Message Thread Service
// File: crates/textbank-core/src/services/thread_service.rs
// ============================================================================
//! Save/query/clear orchestration for conversation message threads:
//! identity resolution, inbound dedup, write-through caching, and the
//! conversation-status machine.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use textbank_shared::utils::mask_cell;
use textbank_shared::{AssignmentId, CampaignId, ConversationId};

use crate::domain::{ContactIdentity, Conversation, Message};
use crate::error::DomainError;
use crate::repositories::{
    ContactIdentityCache, InFlightTracker, MessageRepository, MessageSelector, ThreadCache,
};

/// How a caller refers to a conversation: the direct id, a campaign-wide
/// selection, or the indirect addressing reference of an inbound message.
#[derive(Debug, Clone, Default)]
pub struct ThreadSelector {
    pub conversation_id: Option<ConversationId>,
    pub campaign_id: Option<CampaignId>,
    pub assignment_id: Option<AssignmentId>,
    pub cell: Option<String>,
    pub service: Option<String>,
    pub routing_id: Option<String>,
}

impl ThreadSelector {
    pub fn conversation(id: ConversationId) -> Self {
        Self {
            conversation_id: Some(id),
            ..Self::default()
        }
    }

    pub fn campaign(id: CampaignId) -> Self {
        Self {
            campaign_id: Some(id),
            ..Self::default()
        }
    }
}

/// Outcome of a save. `Duplicate` and `Orphan` both mean "no state changed";
/// they stay distinct for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved {
        conversation: Conversation,
        message: Message,
    },
    /// The message was already saved once; this arrival was dropped.
    Duplicate,
    /// No active conversation exists for the sender. Happens when a contact
    /// replies long after a campaign closed, or a stranger texts the number.
    Orphan,
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}

/// Central coordinator for message threads. Collaborators are injected at
/// construction; the thread cache is already the active or no-op
/// implementation, so no code path here tests for cache presence.
pub struct ThreadService {
    messages: Arc<dyn MessageRepository>,
    cache: Arc<dyn ThreadCache>,
    contacts: Arc<dyn ContactIdentityCache>,
    in_flight: Arc<dyn InFlightTracker>,
}

impl ThreadService {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        cache: Arc<dyn ThreadCache>,
        contacts: Arc<dyn ContactIdentityCache>,
        in_flight: Arc<dyn InFlightTracker>,
    ) -> Self {
        Self {
            messages,
            cache,
            contacts,
            in_flight,
        }
    }

    /// Canonical conversation id for the selector, or `None` when no identity
    /// is determinable from the available information (a legitimate empty
    /// result, not an error). With `cache_only` the identity lookup must not
    /// fall back to a durable query.
    pub async fn resolve_conversation_id(
        &self,
        selector: &ThreadSelector,
        cache_only: bool,
    ) -> Result<Option<ConversationId>, DomainError> {
        if let Some(id) = selector.conversation_id {
            return Ok(Some(id));
        }
        match (&selector.assignment_id, &selector.cell, &selector.routing_id) {
            (Some(_), Some(cell), Some(routing_id)) => {
                let service = selector.service.as_deref().unwrap_or("");
                let found = self
                    .contacts
                    .lookup_by_cell(cell, service, routing_id, cache_only)
                    .await?;
                Ok(found.map(|identity| identity.conversation_id))
            }
            // A campaign-wide selection has no single conversation to resolve.
            (None, None, None) if selector.campaign_id.is_some() => Ok(None),
            _ => Err(DomainError::MissingIdentity),
        }
    }

    /// The conversation's thread in chronological order, served from cache
    /// when a live entry exists, from the durable store otherwise. A durable
    /// result re-seeds the cache. Without a resolvable conversation id the
    /// read selects by campaign (bulk path).
    pub async fn query(&self, selector: &ThreadSelector) -> Result<Vec<Message>, DomainError> {
        let conversation_id = self.resolve_conversation_id(selector, false).await?;
        if let Some(id) = conversation_id {
            if let Some(thread) = self.cache.read(id).await? {
                debug!("Thread cache hit for conversation {}", id);
                return Ok(thread);
            }
        }
        let messages = self
            .messages
            .query_messages(&MessageSelector {
                conversation_id,
                campaign_id: selector.campaign_id,
            })
            .await?;
        self.seed_cache(&messages).await?;
        Ok(messages)
    }

    /// Drop the conversation's cache entry. No-op when no id resolves or no
    /// entry exists.
    pub async fn clear(&self, selector: &ThreadSelector) -> Result<(), DomainError> {
        if let Some(id) = self.resolve_conversation_id(selector, false).await? {
            self.cache.clear(id).await?;
        }
        Ok(())
    }

    /// Save one message and bring conversation, cache, and durable store into
    /// agreement:
    ///
    /// 1. Inbound only: resolve the active conversation from the addressing
    ///    reference and drop orphans and duplicates.
    /// 2. Stamp `created_at`; the provider's timestamps are not trusted and
    ///    clients need a valid date from the cache before the durable write
    ///    lands.
    /// 3. Release the campaign's in-flight slot.
    /// 4. Append to the thread cache.
    /// 5. Advance the conversation status and push it to the identity cache.
    /// 6. Persist the message durably.
    ///
    /// The steps are not one atomic transaction. A cache append that precedes
    /// a failed durable write leaves a transient extra entry; the next full
    /// rebuild from the durable store (the system of record) heals it.
    pub async fn save(
        &self,
        message: Message,
        conversation: Option<Conversation>,
    ) -> Result<SaveOutcome, DomainError> {
        let mut message = message;
        let mut conversation = conversation;

        if message.is_from_contact {
            // Inbound messages arrive with only the addressing reference; the
            // conversation and assignment must be determined from it.
            let service = message.service.clone().unwrap_or_default();
            let routing_id = message.routing_id.clone().unwrap_or_default();
            let found = self
                .contacts
                .lookup_by_cell(&message.contact_number, &service, &routing_id, false)
                .await?;
            let Some(identity) = found else {
                warn!(
                    "Orphan message from {}: no active conversation on service '{}' routing '{}'",
                    mask_cell(&message.contact_number),
                    service,
                    routing_id
                );
                return Ok(SaveOutcome::Orphan);
            };
            if self.is_duplicate(&message, &identity).await? {
                warn!(
                    "Duplicate message '{}' for conversation {}",
                    message.provider_message_id.as_deref().unwrap_or(""),
                    identity.conversation_id
                );
                return Ok(SaveOutcome::Duplicate);
            }
            message = message.with_thread(identity.conversation_id, identity.assignment_id);
            conversation = Some(merge_conversation(conversation, &identity, &message));
        }

        // An outbound save must come with the campaign contact in hand.
        let Some(conversation) = conversation else {
            return Err(DomainError::MissingIdentity);
        };

        let message = Message {
            created_at: Utc::now(),
            ..message
        };

        if let Some(campaign_id) = conversation.campaign_id {
            let texter_user_id = if message.is_from_contact {
                None
            } else {
                message.user_id
            };
            self.in_flight
                .pop_in_flight(campaign_id, conversation.id, texter_user_id)
                .await?;
        }

        self.cache
            .write(conversation.id, std::slice::from_ref(&message), false)
            .await?;

        let new_status = conversation
            .message_status
            .after_message(message.is_from_contact);
        self.contacts.update_status(&conversation, new_status).await?;

        let persisted = self.messages.persist(&message, message.id.is_some()).await?;
        let message = Message {
            id: message.id.or(persisted.id),
            ..message
        };

        let conversation = Conversation {
            message_status: new_status,
            ..conversation
        };
        info!(
            "Saved message on conversation {} ({})",
            conversation.id,
            new_status.as_str()
        );
        Ok(SaveOutcome::Saved {
            conversation,
            message,
        })
    }

    /// Best-effort duplicate detection against the provider-assigned message
    /// id. The durable store's uniqueness constraint stays the final
    /// authority when two arrivals race past this check.
    async fn is_duplicate(
        &self,
        message: &Message,
        identity: &ContactIdentity,
    ) -> Result<bool, DomainError> {
        if let Some(last_provider_id) = identity
            .provider_message_id
            .as_deref()
            .filter(|id| !id.is_empty())
        {
            // Durable-store record: compare against the last known message.
            return Ok(message.provider_message_id.as_deref() == Some(last_provider_id));
        }
        // Cache-derived record: scan the thread. Messages without a provider
        // id are never deduplicated against each other.
        let Some(provider_id) = message
            .provider_message_id
            .as_deref()
            .filter(|id| !id.is_empty())
        else {
            return Ok(false);
        };
        let thread = self
            .query(&ThreadSelector::conversation(identity.conversation_id))
            .await?;
        Ok(thread
            .iter()
            .any(|m| m.provider_message_id.as_deref() == Some(provider_id)))
    }

    /// Seed per-conversation cache entries from a durable result assumed
    /// comprehensive for each conversation it touches. Proceeds one
    /// conversation at a time to bound memory and avoid burst load on the
    /// cache backend.
    async fn seed_cache(&self, messages: &[Message]) -> Result<(), DomainError> {
        let mut threads: BTreeMap<ConversationId, Vec<Message>> = BTreeMap::new();
        for message in messages {
            if let Some(id) = message.conversation_id {
                threads.entry(id).or_default().push(message.clone());
            }
        }
        for (conversation_id, thread) in &threads {
            self.cache.write(*conversation_id, thread, true).await?;
        }
        Ok(())
    }
}

/// The conversation a save applies to: caller-supplied fields win, the
/// identity-cache record fills the gaps, and the message supplies addressing
/// as a last resort. A fresh value is built so the caller's copy is never
/// touched.
fn merge_conversation(
    hint: Option<Conversation>,
    identity: &ContactIdentity,
    message: &Message,
) -> Conversation {
    match hint {
        Some(hint) => Conversation {
            id: hint.id,
            campaign_id: hint.campaign_id,
            assignment_id: hint.assignment_id.or(identity.assignment_id),
            message_status: hint.message_status,
            timezone_offset: hint
                .timezone_offset
                .or_else(|| identity.timezone_offset.clone()),
            cell: if hint.cell.is_empty() {
                message.contact_number.clone()
            } else {
                hint.cell
            },
            routing_id: hint.routing_id.or_else(|| message.routing_id.clone()),
        },
        None => Conversation {
            id: identity.conversation_id,
            campaign_id: None,
            assignment_id: identity.assignment_id,
            message_status: identity.message_status,
            timezone_offset: identity.timezone_offset.clone(),
            cell: message.contact_number.clone(),
            routing_id: message.routing_id.clone(),
        },
    }
}
