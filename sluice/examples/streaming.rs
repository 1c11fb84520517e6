//! Streaming consumption: a closure sink instead of accumulation.
//!
//! For long or unbounded streams, accumulating every consumed item is the
//! wrong default — hand each item to a sink as it arrives and keep memory
//! flat.
//!
//! Run with: cargo run --example streaming

use basin::FnSink;
use sluice::{BoundedQueue, Consumer, Producer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

fn main() {
    const ITEMS: u64 = 1_000_000;

    let queue = BoundedQueue::new(8).expect("capacity is positive");
    let sum = Arc::new(AtomicU64::new(0));

    let sink_sum = Arc::clone(&sum);
    let mut consumer = Consumer::with_sink(
        &queue,
        FnSink(move |v: u64| {
            sink_sum.fetch_add(v, Ordering::Relaxed);
        }),
    );

    let drain = thread::spawn(move || consumer.run());
    let report = Producer::new(1..=ITEMS, &queue).run();
    drain.join().unwrap();

    println!(
        "streamed {} items, sum {}",
        report.delivered,
        sum.load(Ordering::Relaxed)
    );
}
