//! Bounded blocking FIFO mediating one producer and any number of consumers.
//!
//! The core type is [`BoundedQueue`]: a monitor (one mutex, one broadcast
//! condvar) over a capacity-bounded FIFO plus a monotonic closed flag.
//! Pushing blocks while the queue is full; popping blocks while it is empty
//! and still open. Once the producer side calls [`BoundedQueue::close`],
//! every waiting and future pop observes end-of-stream (`Ok(None)`) exactly
//! as soon as the remaining items are drained.
//!
//! [`Producer`] and [`Consumer`] are thin drivers over the queue: the
//! producer feeds a finite source and guarantees the close signal on every
//! exit path, the consumer drains into a [`basin::Sink`] until end-of-stream.
//! Blocked operations are cancelled cooperatively through a [`CancelToken`].
//!
//! # Example
//!
//! ```
//! use sluice::{BoundedQueue, Consumer, Producer};
//! use std::thread;
//!
//! let queue = BoundedQueue::new(5).unwrap();
//!
//! let producer = Producer::new(1..=10, &queue);
//! let mut consumer = Consumer::new(&queue);
//!
//! let feed = thread::spawn(move || producer.run());
//! let drain = thread::spawn(move || {
//!     consumer.run();
//!     consumer
//! });
//!
//! feed.join().unwrap();
//! let consumer = drain.join().unwrap();
//! assert_eq!(consumer.items(), (1..=10).collect::<Vec<_>>());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cancel;
mod consumer;
mod error;
mod producer;
mod queue;

#[cfg(test)]
mod tests;

pub use cancel::CancelToken;
pub use consumer::Consumer;
pub use error::{Interrupted, InvalidCapacity, PushError};
pub use producer::{Producer, ProducerReport, Termination};
pub use queue::BoundedQueue;
