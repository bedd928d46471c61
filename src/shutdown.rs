//! Sweep abort coordination
//!
//! A sweep stops early in two cases: Ctrl+C, and a credential failure
//! that leaves the broker permanently unable to authenticate. Either way
//! the in-flight lookups are allowed to finish and every plate not yet
//! dispatched resolves as exhausted without touching the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Shared handle to an abort signal.
pub type SharedAbort = Arc<AbortSignal>;

/// One-shot abort flag with async notification.
#[derive(Debug, Default)]
pub struct AbortSignal {
    triggered: AtomicBool,
    notify: Notify,
}

impl AbortSignal {
    /// Create a new signal.
    pub fn new() -> Self {
        Self {
            triggered: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    /// Create a new shared signal wrapped in [`Arc`].
    pub fn shared() -> SharedAbort {
        Arc::new(Self::new())
    }

    /// Trip the flag. Waiters are notified exactly once.
    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    /// Whether the flag has been tripped.
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Wait until the flag trips. Returns immediately if already tripped.
    pub async fn triggered(&self) {
        if self.is_triggered() {
            return;
        }
        self.notify.notified().await;
    }
}
