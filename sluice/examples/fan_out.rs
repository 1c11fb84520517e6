//! One producer fanning out to three consumers over a tiny queue.
//!
//! Each removal is exclusive: the consumers split the stream between them,
//! no item is seen twice, and the union is exactly the source.
//!
//! Run with: cargo run --example fan_out

use sluice::{BoundedQueue, Consumer, Producer};
use std::thread;

fn main() {
    const ITEMS: usize = 20;

    let queue = BoundedQueue::new(3).expect("capacity is positive");

    let consumers: Vec<_> = (0..3)
        .map(|id| {
            let mut consumer = Consumer::new(&queue);
            thread::spawn(move || {
                consumer.run();
                (id, consumer.into_items())
            })
        })
        .collect();

    let report = Producer::new(0..ITEMS, &queue).run();

    let mut total = 0;
    for handle in consumers {
        let (id, items) = handle.join().unwrap();
        total += items.len();
        println!("consumer {id} received {} items: {items:?}", items.len());
    }

    println!("produced {}, consumed {total}", report.delivered);
}
