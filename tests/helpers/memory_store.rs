//! In-memory store implementations
//!
//! Stand-ins for the PostgreSQL repositories so flows can be exercised
//! without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use IntakeBot::database::{ConversationStore, NoticeStore};
use IntakeBot::models::{Conversation, CreateNoticeRequest, Notice};
use IntakeBot::{IntakeBotError, Result};

#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: Mutex<HashMap<String, Conversation>>,
    next_id: AtomicI64,
    created: AtomicI64,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sender_id: &str) -> Option<Conversation> {
        self.conversations.lock().unwrap().get(sender_id).cloned()
    }

    /// Put a conversation in place as if it had been stored earlier
    pub fn insert(&self, conversation: Conversation) {
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation.sender_id.clone(), conversation);
    }

    pub fn len(&self) -> usize {
        self.conversations.lock().unwrap().len()
    }

    /// Number of records ever created
    pub fn created_count(&self) -> i64 {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn find_or_create(&self, sender_id: &str) -> Result<Conversation> {
        let mut conversations = self.conversations.lock().unwrap();
        let conversation = conversations.entry(sender_id.to_string()).or_insert_with(|| {
            self.created.fetch_add(1, Ordering::SeqCst);
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            Conversation::new(id, sender_id)
        });
        Ok(conversation.clone())
    }

    async fn save(&self, conversation: &Conversation) -> Result<Conversation> {
        let mut conversations = self.conversations.lock().unwrap();
        match conversations.get_mut(&conversation.sender_id) {
            Some(stored) if stored.id == conversation.id => {
                let mut saved = conversation.clone();
                saved.updated_at = Utc::now();
                *stored = saved.clone();
                Ok(saved)
            }
            _ => Err(IntakeBotError::ConversationNotFound {
                sender_id: conversation.sender_id.clone(),
            }),
        }
    }

    async fn delete(&self, conversation: &Conversation) -> Result<()> {
        let mut conversations = self.conversations.lock().unwrap();
        if conversations.get(&conversation.sender_id).map(|c| c.id) == Some(conversation.id) {
            conversations.remove(&conversation.sender_id);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryNoticeStore {
    notices: Mutex<Vec<Notice>>,
    fail: AtomicBool,
}

impl InMemoryNoticeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.notices.lock().unwrap().len()
    }

    /// Make every following `create` fail
    pub fn fail_writes(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl NoticeStore for InMemoryNoticeStore {
    async fn create(&self, request: CreateNoticeRequest) -> Result<Notice> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(IntakeBotError::InvalidInput("notice store unavailable".to_string()));
        }

        let mut notices = self.notices.lock().unwrap();
        let notice = request.into_notice(notices.len() as i64 + 1, Utc::now());
        notices.push(notice.clone());
        Ok(notice)
    }
}
