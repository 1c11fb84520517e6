//! Producer driver: feeds a finite source into a queue, then closes it.

use crate::cancel::CancelToken;
use crate::queue::BoundedQueue;

/// How a driver's run loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The loop ran out of work naturally.
    Completed,
    /// The loop stopped because its token was cancelled.
    Cancelled,
}

/// Report returned by [`Producer::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducerReport {
    /// Items actually inserted into the queue, in source order.
    pub delivered: usize,
    /// Whether the source was exhausted or the run was cancelled.
    pub termination: Termination,
}

/// Drives every item of a finite source into a [`BoundedQueue`] in order,
/// then closes the queue.
///
/// The close signal fires on *every* exit path — normal completion,
/// cancellation, even a panicking source iterator — so consumers never
/// hang waiting on a producer that has stopped. Cancellation is lossy by
/// design: items not yet pushed when the token fires are dropped with the
/// source.
///
/// # Example
///
/// ```
/// use sluice::{BoundedQueue, Producer, Termination};
///
/// let queue = BoundedQueue::new(4).unwrap();
/// let report = Producer::new(vec![1, 2, 3], &queue).run();
///
/// assert_eq!(report.delivered, 3);
/// assert_eq!(report.termination, Termination::Completed);
/// assert!(queue.is_closed());
/// ```
pub struct Producer<I: IntoIterator> {
    source: I,
    queue: BoundedQueue<I::Item>,
    cancel: CancelToken,
}

/// Closes the queue when dropped, so the completion signal fires even if
/// the source iterator panics mid-run.
struct CloseOnExit<'a, T>(&'a BoundedQueue<T>);

impl<T> Drop for CloseOnExit<'_, T> {
    fn drop(&mut self) {
        self.0.close();
    }
}

impl<I> Producer<I>
where
    I: IntoIterator,
    I::Item: Send + 'static,
{
    /// Create a producer over `source`, sharing `queue`.
    pub fn new(source: I, queue: &BoundedQueue<I::Item>) -> Self {
        Self {
            source,
            queue: queue.clone(),
            cancel: queue.cancel_token(),
        }
    }

    /// Token that cancels this producer's blocked pushes.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Push every source item in order, then close the queue.
    ///
    /// On cancellation the loop stops where it was, the queue is still
    /// closed, and the report carries the count delivered so far.
    pub fn run(self) -> ProducerReport {
        let Self {
            source,
            queue,
            cancel,
        } = self;
        let guard = CloseOnExit(&queue);

        let mut delivered = 0;
        for item in source {
            // A blocking push only fails when the wait is cancelled.
            if guard.0.push(item, &cancel).is_err() {
                return ProducerReport {
                    delivered,
                    termination: Termination::Cancelled,
                };
            }
            delivered += 1;
        }

        ProducerReport {
            delivered,
            termination: Termination::Completed,
        }
    }
}
