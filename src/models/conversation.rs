//! Conversation model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use super::notice::NoticeType;

/// Where a sender currently is in the intake flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    AwaitingId,
    AwaitingType,
    AwaitingAbsenceDays,
    AwaitingCertificateDetail,
    Completed,
    /// A stored state name this build does not know about
    Stale(String),
}

impl ConversationState {
    pub fn as_str(&self) -> &str {
        match self {
            ConversationState::AwaitingId => "awaiting_id",
            ConversationState::AwaitingType => "awaiting_type",
            ConversationState::AwaitingAbsenceDays => "awaiting_absence_days",
            ConversationState::AwaitingCertificateDetail => "awaiting_certificate_detail",
            ConversationState::Completed => "completed",
            ConversationState::Stale(raw) => raw,
        }
    }

    /// Decode a stored state name; unknown names become `Stale`
    pub fn parse(raw: &str) -> Self {
        match raw {
            "awaiting_id" => ConversationState::AwaitingId,
            "awaiting_type" => ConversationState::AwaitingType,
            "awaiting_absence_days" => ConversationState::AwaitingAbsenceDays,
            "awaiting_certificate_detail" => ConversationState::AwaitingCertificateDetail,
            "completed" => ConversationState::Completed,
            other => ConversationState::Stale(other.to_string()),
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub sender_id: String,
    pub state: ConversationState,
    pub subject_id: Option<String>,
    pub notice_type: Option<NoticeType>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// A fresh conversation for a sender seen for the first time
    pub fn new(id: i64, sender_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            sender_id: sender_id.into(),
            state: ConversationState::AwaitingId,
            subject_id: None,
            notice_type: None,
            metadata: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for Conversation {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let state: String = row.try_get("state")?;
        let notice_type: Option<String> = row.try_get("notice_type")?;
        let notice_type = notice_type
            .map(|raw| raw.parse::<NoticeType>())
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "notice_type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            sender_id: row.try_get("sender_id")?,
            state: ConversationState::parse(&state),
            subject_id: row.try_get("subject_id")?,
            notice_type,
            metadata: row.try_get("metadata")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
