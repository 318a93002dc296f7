//! Services module
//!
//! This module contains business logic services

pub mod intake;
pub mod notification;
pub mod sender_lock;

// Re-export commonly used services
pub use intake::{IntakeOutcome, IntakeService};
pub use notification::{normalize_recipient, DeliveryReceipt, Notifier, OutboundMessage, WhatsAppSender};
pub use sender_lock::{SenderGuard, SenderLocks};
