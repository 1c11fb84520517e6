//! Bounded blocking FIFO with end-of-stream signalling.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crate::cancel::{CancelToken, WakeAll};
use crate::error::{Interrupted, InvalidCapacity, PushError};

/// Monitor state. `items` and `closed` live under one mutex so a reader
/// can never observe one mutating without the other: a pop that sees the
/// queue empty decides between "wait" and "end of stream" against a
/// `closed` value from the same critical section.
struct State<T> {
    items: VecDeque<T>,
    closed: bool,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    /// One broadcast condvar for both "not full" and "not empty or closed".
    /// Every state change calls `notify_all`; each waiter re-checks its own
    /// predicate in a loop, which also absorbs spurious wakeups and lets
    /// multiple consumers compete safely for the same removal.
    cond: Condvar,
    capacity: usize,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // Critical sections only move items in and out of the VecDeque and
        // flip the closed flag; a poisoned lock cannot hold a half-applied
        // mutation, so the guard is recovered rather than propagated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&'a self, guard: MutexGuard<'a, State<T>>) -> MutexGuard<'a, State<T>> {
        self.cond.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> WakeAll for Shared<T> {
    fn wake_all(&self) {
        // The lock round-trip pairs with the waiter's predicate re-check:
        // a waiter between its check and its wait still holds the mutex, so
        // this cannot run (and notify) until that waiter is actually parked.
        drop(self.lock());
        self.cond.notify_all();
    }
}

/// Capacity-bounded blocking FIFO shared by one producer and any number of
/// consumers.
///
/// Cloning yields another handle to the same queue; the queue lives as long
/// as its longest-lived handle. `push` blocks while the queue is full, `pop`
/// blocks while it is empty and still open. [`close`](Self::close) marks the
/// end of production: it is idempotent, irreversible, and wakes every
/// waiter, after which pops drain the remaining items and then report
/// end-of-stream (`Ok(None)`) without blocking.
///
/// Items are delivered in insertion order, each to exactly one popper.
///
/// # Example
///
/// ```
/// use sluice::BoundedQueue;
///
/// let queue = BoundedQueue::new(2).unwrap();
/// let token = queue.cancel_token();
///
/// queue.push(1, &token).unwrap();
/// queue.push(2, &token).unwrap();
/// queue.close();
///
/// assert_eq!(queue.pop(&token), Ok(Some(1)));
/// assert_eq!(queue.pop(&token), Ok(Some(2)));
/// assert_eq!(queue.pop(&token), Ok(None));
/// ```
pub struct BoundedQueue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for BoundedQueue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items.
    ///
    /// # Errors
    /// Returns [`InvalidCapacity`] when `capacity` is zero; no queue is
    /// created.
    pub fn new(capacity: usize) -> Result<Self, InvalidCapacity> {
        if capacity == 0 {
            return Err(InvalidCapacity);
        }
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    items: VecDeque::with_capacity(capacity),
                    closed: false,
                }),
                cond: Condvar::new(),
                capacity,
            }),
        })
    }

    /// Append an item to the tail, blocking while the queue is full.
    ///
    /// Wakes all waiters after inserting. Intended for a single producer
    /// per queue; nothing enforces that, but `close` semantics assume it.
    ///
    /// # Errors
    /// [`PushError::Interrupted`] when `cancel` fires while waiting for
    /// space — the item is handed back and the queue is untouched.
    pub fn push(&self, item: T, cancel: &CancelToken) -> Result<(), PushError<T>> {
        let mut state = self.shared.lock();
        while state.items.len() == self.shared.capacity {
            if cancel.is_cancelled() {
                return Err(PushError::Interrupted(item));
            }
            state = self.shared.wait(state);
        }
        state.items.push_back(item);
        self.shared.cond.notify_all();
        Ok(())
    }

    /// Remove the head item, blocking while the queue is empty and open.
    ///
    /// `Ok(None)` is the end-of-stream signal: the queue is empty and
    /// closed, and every further `pop` returns `Ok(None)` immediately.
    /// Wakes all waiters after removing an item.
    ///
    /// # Errors
    /// [`Interrupted`] when `cancel` fires while waiting — no item is
    /// consumed.
    pub fn pop(&self, cancel: &CancelToken) -> Result<Option<T>, Interrupted> {
        let mut state = self.shared.lock();
        while state.items.is_empty() && !state.closed {
            if cancel.is_cancelled() {
                return Err(Interrupted);
            }
            state = self.shared.wait(state);
        }
        match state.items.pop_front() {
            Some(item) => {
                self.shared.cond.notify_all();
                Ok(Some(item))
            }
            // Empty and closed: end of stream.
            None => Ok(None),
        }
    }

    /// Non-blocking push.
    ///
    /// # Errors
    /// [`PushError::Full`] with the item handed back when at capacity.
    pub fn try_push(&self, item: T) -> Result<(), PushError<T>> {
        let mut state = self.shared.lock();
        if state.items.len() == self.shared.capacity {
            return Err(PushError::Full(item));
        }
        state.items.push_back(item);
        self.shared.cond.notify_all();
        Ok(())
    }

    /// Non-blocking pop. `None` means nothing was available right now —
    /// unlike [`pop`](Self::pop), it does not distinguish end-of-stream.
    #[must_use]
    pub fn try_pop(&self) -> Option<T> {
        let mut state = self.shared.lock();
        let item = state.items.pop_front();
        if item.is_some() {
            self.shared.cond.notify_all();
        }
        item
    }

    /// Mark production finished and wake all waiters.
    ///
    /// Idempotent and irreversible. After the remaining items drain,
    /// every `pop` reports end-of-stream.
    pub fn close(&self) {
        let mut state = self.shared.lock();
        state.closed = true;
        self.shared.cond.notify_all();
    }

    /// Number of items currently held. Read under the monitor lock, so it
    /// is never torn, but it can be stale by the time the caller acts on it.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.lock().items.len()
    }

    /// True if the queue currently holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.lock().items.is_empty()
    }

    /// True once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    /// Maximum number of held items, fixed at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }
}

impl<T> BoundedQueue<T>
where
    T: Send + 'static,
{
    /// Mint a token whose [`cancel`](CancelToken::cancel) wakes this
    /// queue's waiters. Each driver should hold its own token.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        CancelToken::new(Arc::clone(&self.shared) as Arc<dyn WakeAll + Send + Sync>)
    }
}

impl<T> core::fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("BoundedQueue")
            .field("len", &state.items.len())
            .field("capacity", &self.shared.capacity)
            .field("closed", &state.closed)
            .finish()
    }
}
