//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod conversation;
pub mod notice;

// Re-export commonly used models
pub use conversation::{Conversation, ConversationState};
pub use notice::{Notice, NoticeType, CreateNoticeRequest};
