//! Database service layer
//!
//! This module bundles the repositories sharing one connection pool

use crate::database::{DatabasePool, ConversationRepository, NoticeRepository};
use crate::utils::errors::IntakeBotError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub conversations: ConversationRepository,
    pub notices: NoticeRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            conversations: ConversationRepository::new(pool.clone()),
            notices: NoticeRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check the database answers queries
    pub async fn health_check(&self) -> Result<(), IntakeBotError> {
        super::connection::health_check(&self.pool).await
    }

    /// Get database statistics
    pub async fn get_stats(&self) -> Result<DatabaseStats, IntakeBotError> {
        Ok(DatabaseStats {
            total_conversations: self.conversations.count().await?,
            total_notices: self.notices.count().await?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub total_conversations: i64,
    pub total_notices: i64,
}
