//! Error types for queue construction and blocking operations.

use core::fmt;

use snafu::Snafu;

/// Queue construction rejected a capacity of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(display("capacity must be positive"))]
pub struct InvalidCapacity;

/// A blocking wait was cancelled through its [`CancelToken`](crate::CancelToken).
///
/// The queue itself is untouched: no item was consumed, no state corrupted.
/// Drivers translate this into orderly termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(display("blocking wait was cancelled"))]
pub struct Interrupted;

/// Error from a failed push. Carries the rejected item back to the caller,
/// so a cancelled push has no partial effect.
#[derive(Debug, PartialEq, Eq)]
pub enum PushError<T> {
    /// The wait was cancelled before the item could be inserted.
    Interrupted(T),
    /// Non-blocking push found the queue at capacity.
    Full(T),
}

impl<T> PushError<T> {
    /// Recover the rejected item.
    pub fn into_item(self) -> T {
        match self {
            Self::Interrupted(item) | Self::Full(item) => item,
        }
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupted(_) => write!(f, "push cancelled before insertion"),
            Self::Full(_) => write!(f, "queue is at capacity"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for PushError<T> {}
