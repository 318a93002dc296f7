//! Conversation repository implementation

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;

use crate::database::store::ConversationStore;
use crate::models::{Conversation, ConversationState};
use crate::utils::errors::IntakeBotError;

const CONVERSATION_COLUMNS: &str =
    "id, sender_id, state, subject_id, notice_type, metadata, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ConversationRepository {
    pool: PgPool,
}

impl ConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find conversation by sender id
    pub async fn find_by_sender_id(&self, sender_id: &str) -> Result<Option<Conversation>, IntakeBotError> {
        let conversation = sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {} FROM conversations WHERE sender_id = $1",
            CONVERSATION_COLUMNS
        ))
        .bind(sender_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(conversation)
    }

    /// Find or create the conversation for a sender.
    ///
    /// The insert yields to a concurrent insert of the same sender through the
    /// unique key; the follow-up select then sees whichever row won.
    pub async fn find_or_create(&self, sender_id: &str) -> Result<Conversation, IntakeBotError> {
        let now = Utc::now();
        let inserted = sqlx::query(
            r#"
            INSERT INTO conversations (sender_id, state, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            ON CONFLICT (sender_id) DO NOTHING
            "#
        )
        .bind(sender_id)
        .bind(ConversationState::AwaitingId.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            debug!(sender_id = sender_id, "Created conversation");
        }

        self.find_by_sender_id(sender_id)
            .await?
            .ok_or_else(|| IntakeBotError::ConversationNotFound { sender_id: sender_id.to_string() })
    }

    /// Persist state, collected fields and metadata
    pub async fn save(&self, conversation: &Conversation) -> Result<Conversation, IntakeBotError> {
        let saved = sqlx::query_as::<_, Conversation>(&format!(
            r#"
            UPDATE conversations
            SET state = $2,
                subject_id = $3,
                notice_type = $4,
                metadata = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING {}
            "#,
            CONVERSATION_COLUMNS
        ))
        .bind(conversation.id)
        .bind(conversation.state.as_str())
        .bind(conversation.subject_id.as_deref())
        .bind(conversation.notice_type.map(|t| t.as_str()))
        .bind(conversation.metadata.clone())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| IntakeBotError::ConversationNotFound {
            sender_id: conversation.sender_id.clone(),
        })
    }

    /// Delete conversation
    pub async fn delete(&self, id: i64) -> Result<(), IntakeBotError> {
        sqlx::query("DELETE FROM conversations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count stored conversations
    pub async fn count(&self) -> Result<i64, IntakeBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conversations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[async_trait]
impl ConversationStore for ConversationRepository {
    async fn find_or_create(&self, sender_id: &str) -> crate::Result<Conversation> {
        ConversationRepository::find_or_create(self, sender_id).await
    }

    async fn save(&self, conversation: &Conversation) -> crate::Result<Conversation> {
        ConversationRepository::save(self, conversation).await
    }

    async fn delete(&self, conversation: &Conversation) -> crate::Result<()> {
        ConversationRepository::delete(self, conversation.id).await
    }
}
