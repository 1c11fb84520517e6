//! Consumer driver: drains a queue into a sink until end-of-stream.

use basin::{CollectSink, Sink};

use crate::cancel::CancelToken;
use crate::error::Interrupted;
use crate::producer::Termination;
use crate::queue::BoundedQueue;

/// Repeatedly pops a [`BoundedQueue`] and hands each item, in arrival
/// order, to a [`Sink`], stopping at end-of-stream or cancellation.
///
/// The default sink is [`CollectSink`], which accumulates everything the
/// consumer received. For long or unbounded streams, pass a streaming sink
/// (for example [`basin::FnSink`]) via [`with_sink`](Self::with_sink)
/// instead of accumulating.
///
/// Several consumers may share one queue; each removal is exclusive, so
/// no item reaches more than one of them.
///
/// # Example
///
/// ```
/// use sluice::{BoundedQueue, Consumer, Producer};
///
/// let queue = BoundedQueue::new(3).unwrap();
/// Producer::new(vec![1, 2, 3], &queue).run();
///
/// let mut consumer = Consumer::new(&queue);
/// consumer.run();
/// assert_eq!(consumer.items(), [1, 2, 3]);
/// ```
pub struct Consumer<T, S: Sink<T> = CollectSink<T>> {
    queue: BoundedQueue<T>,
    sink: S,
    cancel: CancelToken,
}

impl<T: Send + 'static> Consumer<T> {
    /// Create a consumer that collects into a [`CollectSink`].
    pub fn new(queue: &BoundedQueue<T>) -> Self {
        Self::with_sink(queue, CollectSink::new())
    }
}

impl<T, S> Consumer<T, S>
where
    T: Send + 'static,
    S: Sink<T>,
{
    /// Create a consumer draining into `sink`.
    pub fn with_sink(queue: &BoundedQueue<T>, sink: S) -> Self {
        Self {
            queue: queue.clone(),
            sink,
            cancel: queue.cancel_token(),
        }
    }

    /// Token that cancels this consumer's blocked pops.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Pop until end-of-stream or cancellation.
    ///
    /// Everything already consumed stays in the sink either way; the sink's
    /// `finish` hook runs exactly once per terminating run.
    pub fn run(&mut self) -> Termination {
        loop {
            match self.queue.pop(&self.cancel) {
                Ok(Some(item)) => self.sink.accept(item),
                Ok(None) => {
                    self.sink.finish();
                    return Termination::Completed;
                }
                Err(Interrupted) => {
                    self.sink.finish();
                    return Termination::Cancelled;
                }
            }
        }
    }

    /// Reference to the sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the driver and return its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<T: Send + 'static> Consumer<T, CollectSink<T>> {
    /// Items consumed so far, in arrival order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.sink.items()
    }

    /// Take the consumed items, leaving the sink empty.
    pub fn take_items(&mut self) -> Vec<T> {
        self.sink.take()
    }

    /// Consume the driver and return the collected items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.sink.into_items()
    }
}
