//! Notice model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::utils::errors::IntakeBotError;

/// The two intake flows a conversation can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeType {
    Absence,
    Certificate,
}

impl NoticeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeType::Absence => "absence",
            NoticeType::Certificate => "certificate",
        }
    }
}

impl fmt::Display for NoticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoticeType {
    type Err = IntakeBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absence" => Ok(NoticeType::Absence),
            "certificate" => Ok(NoticeType::Certificate),
            other => Err(IntakeBotError::InvalidInput(format!("Unknown notice type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: i64,
    pub subject_id: String,
    pub notice_type: NoticeType,
    pub sender_id: String,
    pub start_date: Option<NaiveDate>,
    pub day_count: Option<i32>,
    pub certificate_detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Values for a notice about to be appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoticeRequest {
    pub subject_id: String,
    pub notice_type: NoticeType,
    pub sender_id: String,
    pub start_date: Option<NaiveDate>,
    pub day_count: Option<i32>,
    pub certificate_detail: Option<String>,
}

impl CreateNoticeRequest {
    pub fn absence(subject_id: String, sender_id: String, start_date: NaiveDate, day_count: i32) -> Self {
        Self {
            subject_id,
            notice_type: NoticeType::Absence,
            sender_id,
            start_date: Some(start_date),
            day_count: Some(day_count),
            certificate_detail: None,
        }
    }

    pub fn certificate(subject_id: String, sender_id: String, detail: String) -> Self {
        Self {
            subject_id,
            notice_type: NoticeType::Certificate,
            sender_id,
            start_date: None,
            day_count: None,
            certificate_detail: Some(detail),
        }
    }

    /// Materialize the request as a stored notice
    pub fn into_notice(self, id: i64, created_at: DateTime<Utc>) -> Notice {
        Notice {
            id,
            subject_id: self.subject_id,
            notice_type: self.notice_type,
            sender_id: self.sender_id,
            start_date: self.start_date,
            day_count: self.day_count,
            certificate_detail: self.certificate_detail,
            created_at,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for Notice {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let notice_type: String = row.try_get("notice_type")?;
        let notice_type = notice_type.parse::<NoticeType>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "notice_type".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            subject_id: row.try_get("subject_id")?,
            notice_type,
            sender_id: row.try_get("sender_id")?,
            start_date: row.try_get("start_date")?,
            day_count: row.try_get("day_count")?,
            certificate_detail: row.try_get("certificate_detail")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
