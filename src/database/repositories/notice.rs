//! Notice repository implementation
//!
//! Notices are append-only.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::database::store::NoticeStore;
use crate::models::{CreateNoticeRequest, Notice};
use crate::utils::errors::IntakeBotError;

const NOTICE_COLUMNS: &str =
    "id, subject_id, notice_type, sender_id, start_date, day_count, certificate_detail, created_at";

#[derive(Debug, Clone)]
pub struct NoticeRepository {
    pool: PgPool,
}

impl NoticeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a new notice
    pub async fn create(&self, request: CreateNoticeRequest) -> Result<Notice, IntakeBotError> {
        let notice = sqlx::query_as::<_, Notice>(&format!(
            r#"
            INSERT INTO notices (subject_id, notice_type, sender_id, start_date, day_count, certificate_detail, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            NOTICE_COLUMNS
        ))
        .bind(request.subject_id)
        .bind(request.notice_type.as_str())
        .bind(request.sender_id)
        .bind(request.start_date)
        .bind(request.day_count)
        .bind(request.certificate_detail)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(notice)
    }

    /// Notices filed from one sender, newest first
    pub async fn find_by_sender(&self, sender_id: &str) -> Result<Vec<Notice>, IntakeBotError> {
        let notices = sqlx::query_as::<_, Notice>(&format!(
            "SELECT {} FROM notices WHERE sender_id = $1 ORDER BY created_at DESC, id DESC",
            NOTICE_COLUMNS
        ))
        .bind(sender_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notices)
    }

    /// Count stored notices
    pub async fn count(&self) -> Result<i64, IntakeBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[async_trait]
impl NoticeStore for NoticeRepository {
    async fn create(&self, request: CreateNoticeRequest) -> crate::Result<Notice> {
        NoticeRepository::create(self, request).await
    }
}
