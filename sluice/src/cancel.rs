//! Cooperative cancellation for blocked queue operations.

use core::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Wakes every waiter of a monitor so it can re-check its predicate.
pub(crate) trait WakeAll {
    fn wake_all(&self);
}

/// Handle that cancels blocked `push`/`pop` calls on one queue.
///
/// Minted by [`BoundedQueue::cancel_token`](crate::BoundedQueue::cancel_token).
/// Cancelling sets a flag and wakes every waiter on the queue; only waits
/// that were passed *this* token observe the cancellation, so one driver
/// can be stopped without disturbing the others sharing the queue.
///
/// Cancellation is observed while waiting: an operation that never has to
/// block completes normally even if its token was already cancelled.
/// `cancel()` is idempotent, and tokens are cheap to clone.
#[derive(Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    monitor: Arc<dyn WakeAll + Send + Sync>,
}

impl CancelToken {
    pub(crate) fn new(monitor: Arc<dyn WakeAll + Send + Sync>) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            monitor,
        }
    }

    /// Cancel the waits holding this token.
    ///
    /// `wake_all` takes the monitor lock before notifying, which orders the
    /// flag store before any waiter's next predicate check — a waiter that
    /// was between its check and its wait cannot miss the wakeup.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.monitor.wake_all();
    }

    /// True once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}
