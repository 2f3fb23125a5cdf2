//! Cancellation tokens scoped to a single fetch attempt.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Handle representing one fetch attempt's validity window.
///
/// Clones share state: cancelling any clone cancels them all. Cancellation
/// is one-way and sticky; a token that belonged to a superseded invocation
/// stays cancelled forever, and the loader ignores anything tagged with it.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Signal cancellation. Idempotent; only the first call wakes waiters.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            tracing::trace!(target: "requery::token", "cancellation signalled");
            self.notify.notify_waiters();
        }
    }

    /// Check whether cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Wait until cancellation is signalled. Returns immediately if it
    /// already has been.
    pub async fn cancelled(&self) {
        // Subscribe to Notify BEFORE checking the flag to avoid TOCTOU race:
        // without this, cancel() could fire between the check and the await,
        // and notify_waiters() would have no subscribers, losing the wakeup.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
