//! Store interfaces
//!
//! The intake service only talks to persistence through these traits. The
//! PostgreSQL repositories implement them for production.

use async_trait::async_trait;

use crate::models::{Conversation, CreateNoticeRequest, Notice};
use crate::utils::errors::Result;

/// Keyed conversation records, one per sender
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Return the sender's conversation, creating it in `AwaitingId` on first contact.
    /// Concurrent first contacts for one sender must yield the same record.
    async fn find_or_create(&self, sender_id: &str) -> Result<Conversation>;

    /// Persist the mutable fields of a conversation
    async fn save(&self, conversation: &Conversation) -> Result<Conversation>;

    async fn delete(&self, conversation: &Conversation) -> Result<()>;
}

/// Append-only notice records
#[async_trait]
pub trait NoticeStore: Send + Sync {
    async fn create(&self, request: CreateNoticeRequest) -> Result<Notice>;
}
