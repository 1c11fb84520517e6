//! One producer, one consumer, bounded handoff.
//!
//! Run with: cargo run --example pipeline

use sluice::{BoundedQueue, Consumer, Producer};
use std::thread;

fn main() {
    let data: Vec<i32> = (1..=10).collect();
    let queue = BoundedQueue::new(5).expect("capacity is positive");

    let producer = Producer::new(data, &queue);
    let mut consumer = Consumer::new(&queue);

    let feed = thread::spawn(move || producer.run());
    let drain = thread::spawn(move || {
        consumer.run();
        consumer
    });

    let report = feed.join().unwrap();
    let consumer = drain.join().unwrap();

    println!("Delivered {} items", report.delivered);
    println!("Processed: {:?}", consumer.items());
}
