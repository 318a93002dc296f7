//! Test helpers module
//!
//! This module provides utilities and helpers for testing IntakeBot.
//! It includes in-memory stores, a recording notifier, a WhatsApp mock
//! server and a test context wiring them into the router.

#![allow(dead_code)]

pub mod memory_store;
pub mod recording_notifier;
pub mod test_context;
pub mod test_data;
pub mod whatsapp_mock;

pub use memory_store::*;
pub use recording_notifier::*;
pub use test_context::*;
pub use test_data::*;
pub use whatsapp_mock::*;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}
