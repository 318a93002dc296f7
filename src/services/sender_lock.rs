//! Per-sender serialization
//!
//! Webhook deliveries for one sender (including provider retries) must not
//! interleave their read-transition-write sequences. Each sender id gets a
//! mutex for as long as someone holds or waits on it.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct SenderLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

/// Exclusive hold on one sender; released on drop
pub struct SenderGuard {
    guard: Option<OwnedMutexGuard<()>>,
    sender_id: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl SenderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other task holds this sender, then hold it
    pub async fn acquire(&self, sender_id: &str) -> SenderGuard {
        let lock = self.locks.entry(sender_id.to_string()).or_default().clone();
        let guard = lock.lock_owned().await;

        SenderGuard {
            guard: Some(guard),
            sender_id: sender_id.to_string(),
            locks: self.locks.clone(),
        }
    }

    /// Number of senders currently held or awaited
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for SenderGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map still references the mutex: nobody is waiting.
        self.locks
            .remove_if(&self.sender_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
