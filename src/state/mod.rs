//! Conversation state machine
//!
//! This module holds the menu catalog and the pure transition function
//! driving the intake flow.

pub mod menu;
pub mod transition;


// Re-export commonly used state components
pub use menu::{MenuButton, MenuCatalog, Prompts};
pub use transition::{transition, reset, ConversationOp, InboundEvent, Reply, Transition};
