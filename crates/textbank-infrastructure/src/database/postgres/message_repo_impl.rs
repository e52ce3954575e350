// ============================================================================
// Textbank Infrastructure - PostgreSQL Message Repository
// File: crates/textbank-infrastructure/src/database/postgres/message_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;

use textbank_core::domain::Message;
use textbank_core::error::DomainError;
use textbank_core::repositories::{MessageRepository, MessageSelector};

/// All message columns except `service_response`: the payload is large and
/// not wanted in bulk reads or cached threads.
const MESSAGE_COLUMNS: &str = "messages.id, messages.conversation_id, messages.assignment_id, \
     messages.user_id, messages.contact_number, messages.text, messages.service, \
     messages.routing_id, messages.provider_message_id, messages.is_from_contact, \
     messages.created_at";

pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MessageRow {
    id: i64,
    conversation_id: Option<i64>,
    assignment_id: Option<i64>,
    user_id: Option<i64>,
    contact_number: String,
    text: String,
    service: Option<String>,
    routing_id: Option<String>,
    provider_message_id: Option<String>,
    is_from_contact: bool,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: Some(row.id),
            conversation_id: row.conversation_id,
            assignment_id: row.assignment_id,
            user_id: row.user_id,
            contact_number: row.contact_number,
            text: row.text,
            service: row.service,
            routing_id: row.routing_id,
            provider_message_id: row.provider_message_id,
            is_from_contact: row.is_from_contact,
            service_response: None,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn query_messages(
        &self,
        selector: &MessageSelector,
    ) -> Result<Vec<Message>, DomainError> {
        let result: Result<Vec<MessageRow>, sqlx::Error> =
            if let Some(conversation_id) = selector.conversation_id {
                sqlx::query_as(&format!(
                    "SELECT {MESSAGE_COLUMNS} \
                     FROM messages \
                     WHERE messages.conversation_id = $1 \
                     ORDER BY messages.created_at"
                ))
                .bind(conversation_id)
                .fetch_all(&self.pool)
                .await
            } else if let Some(campaign_id) = selector.campaign_id {
                sqlx::query_as(&format!(
                    "SELECT {MESSAGE_COLUMNS} \
                     FROM messages \
                     JOIN assignments ON messages.assignment_id = assignments.id \
                     WHERE assignments.campaign_id = $1 \
                     ORDER BY messages.created_at"
                ))
                .bind(campaign_id)
                .fetch_all(&self.pool)
                .await
            } else {
                return Ok(Vec::new());
            };

        let rows = result.map_err(|e| {
            error!("Database error querying messages: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn persist(&self, message: &Message, is_update: bool) -> Result<Message, DomainError> {
        let result: Result<MessageRow, sqlx::Error> = if is_update {
            sqlx::query_as(&format!(
                "UPDATE messages SET \
                     conversation_id = $2, \
                     assignment_id = $3, \
                     user_id = $4, \
                     contact_number = $5, \
                     text = $6, \
                     service = $7, \
                     routing_id = $8, \
                     provider_message_id = $9, \
                     is_from_contact = $10, \
                     service_response = $11, \
                     created_at = $12 \
                 WHERE id = $1 \
                 RETURNING {MESSAGE_COLUMNS}"
            ))
            .bind(message.id)
            .bind(message.conversation_id)
            .bind(message.assignment_id)
            .bind(message.user_id)
            .bind(&message.contact_number)
            .bind(&message.text)
            .bind(&message.service)
            .bind(&message.routing_id)
            .bind(&message.provider_message_id)
            .bind(message.is_from_contact)
            .bind(&message.service_response)
            .bind(message.created_at)
            .fetch_one(&self.pool)
            .await
        } else {
            sqlx::query_as(&format!(
                "INSERT INTO messages ( \
                     conversation_id, assignment_id, user_id, contact_number, text, \
                     service, routing_id, provider_message_id, is_from_contact, \
                     service_response, created_at \
                 ) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
                 RETURNING {MESSAGE_COLUMNS}"
            ))
            .bind(message.conversation_id)
            .bind(message.assignment_id)
            .bind(message.user_id)
            .bind(&message.contact_number)
            .bind(&message.text)
            .bind(&message.service)
            .bind(&message.routing_id)
            .bind(&message.provider_message_id)
            .bind(message.is_from_contact)
            .bind(&message.service_response)
            .bind(message.created_at)
            .fetch_one(&self.pool)
            .await
        };

        let row = result.map_err(|e| {
            error!("Database error persisting message: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(row.into())
    }
}
