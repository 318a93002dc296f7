//! Database repositories module
//!
//! This module contains repository implementations for data access

pub mod conversation;
pub mod notice;

// Re-export repositories
pub use conversation::ConversationRepository;
pub use notice::NoticeRepository;
