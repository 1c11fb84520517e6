//! Multi-threaded queue behavior: blocking, waking, cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::{BoundedQueue, Interrupted, PushError};

/// A push beyond capacity must park until a pop makes room.
#[test]
fn push_blocks_at_capacity_until_pop() {
    let queue = BoundedQueue::new(2).unwrap();
    let token = queue.cancel_token();
    queue.push(1, &token).unwrap();
    queue.push(2, &token).unwrap();

    let landed = Arc::new(AtomicBool::new(false));
    let landed_in_thread = Arc::clone(&landed);
    let producer_queue = queue.clone();
    let producer = thread::spawn(move || {
        let token = producer_queue.cancel_token();
        producer_queue.push(3, &token).unwrap();
        landed_in_thread.store(true, Ordering::SeqCst);
    });

    // Give the thread time to park on the full queue.
    thread::sleep(Duration::from_millis(100));
    assert!(!landed.load(Ordering::SeqCst), "push did not block at capacity");
    assert_eq!(queue.len(), 2);

    assert_eq!(queue.pop(&token), Ok(Some(1)));
    producer.join().expect("producer panicked");
    assert!(landed.load(Ordering::SeqCst));

    assert_eq!(queue.pop(&token), Ok(Some(2)));
    assert_eq!(queue.pop(&token), Ok(Some(3)));
}

/// A pop on an empty open queue must park until an insert arrives.
#[test]
fn pop_blocks_until_push() {
    let queue = BoundedQueue::new(2).unwrap();

    let consumer_queue = queue.clone();
    let consumer = thread::spawn(move || {
        let token = consumer_queue.cancel_token();
        consumer_queue.pop(&token)
    });

    thread::sleep(Duration::from_millis(100));
    let token = queue.cancel_token();
    queue.push(42, &token).unwrap();

    assert_eq!(consumer.join().expect("consumer panicked"), Ok(Some(42)));
}

/// Closing must release a parked pop with end-of-stream.
#[test]
fn pop_blocks_until_close() {
    let queue = BoundedQueue::<u32>::new(2).unwrap();

    let consumer_queue = queue.clone();
    let consumer = thread::spawn(move || {
        let token = consumer_queue.cancel_token();
        consumer_queue.pop(&token)
    });

    thread::sleep(Duration::from_millis(100));
    queue.close();

    assert_eq!(consumer.join().expect("consumer panicked"), Ok(None));
}

/// SPSC through a tiny queue: everything arrives, once, in order.
#[test]
fn spsc_delivers_source_exactly_in_order() {
    let queue = BoundedQueue::new(2).unwrap();
    let num_items = 10_000usize;

    let producer_queue = queue.clone();
    let producer = thread::spawn(move || {
        let token = producer_queue.cancel_token();
        for i in 0..num_items {
            producer_queue.push(i, &token).unwrap();
        }
        producer_queue.close();
    });

    let consumer_queue = queue.clone();
    let consumer = thread::spawn(move || {
        let token = consumer_queue.cancel_token();
        let mut received = Vec::new();
        while let Some(v) = consumer_queue.pop(&token).unwrap() {
            received.push(v);
        }
        received
    });

    producer.join().expect("producer panicked");
    let received = consumer.join().expect("consumer panicked");

    assert_eq!(received, (0..num_items).collect::<Vec<_>>());
    assert!(queue.is_empty());
    assert!(queue.is_closed());
}

/// Competing consumers never duplicate or lose a removal.
#[test]
fn multiple_consumers_split_stream_without_duplicates() {
    let queue = BoundedQueue::new(3).unwrap();
    let num_items = 20usize;

    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let queue = queue.clone();
            thread::spawn(move || {
                let token = queue.cancel_token();
                let mut mine = Vec::new();
                while let Some(v) = queue.pop(&token).unwrap() {
                    mine.push(v);
                }
                mine
            })
        })
        .collect();

    let token = queue.cancel_token();
    for i in 0..num_items {
        queue.push(i, &token).unwrap();
    }
    queue.close();

    let mut union = Vec::new();
    for handle in consumers {
        let mine = handle.join().expect("consumer panicked");
        // Per-consumer relative order must follow insertion order.
        for w in mine.windows(2) {
            assert!(w[0] < w[1], "consumer order violated: {} then {}", w[0], w[1]);
        }
        union.extend(mine);
    }

    union.sort_unstable();
    assert_eq!(union, (0..num_items).collect::<Vec<_>>());
}

/// Snapshot reads stay within bounds while both sides hammer the queue.
#[test]
fn len_never_exceeds_capacity_under_load() {
    let queue = BoundedQueue::new(8).unwrap();

    let producer_queue = queue.clone();
    let producer = thread::spawn(move || {
        let token = producer_queue.cancel_token();
        for i in 0..5_000u32 {
            producer_queue.push(i, &token).unwrap();
        }
        producer_queue.close();
    });

    let consumer_queue = queue.clone();
    let consumer = thread::spawn(move || {
        let token = consumer_queue.cancel_token();
        while consumer_queue.pop(&token).unwrap().is_some() {}
    });

    for _ in 0..1_000 {
        let len = queue.len();
        assert!(len <= 8, "len {len} exceeds capacity");
        thread::yield_now();
    }

    producer.join().expect("producer panicked");
    consumer.join().expect("consumer panicked");
}

/// Cancelling a parked pop releases it with `Interrupted`.
#[test]
fn cancel_releases_blocked_pop() {
    let queue = BoundedQueue::<u32>::new(1).unwrap();
    let token = queue.cancel_token();

    let waiter_token = token.clone();
    let waiter_queue = queue.clone();
    let waiter = thread::spawn(move || waiter_queue.pop(&waiter_token));

    thread::sleep(Duration::from_millis(100));
    token.cancel();

    assert_eq!(waiter.join().expect("waiter panicked"), Err(Interrupted));
    // The queue itself is untouched.
    assert!(!queue.is_closed());
    assert!(queue.is_empty());
}

/// Cancelling a parked push releases it and hands the item back.
#[test]
fn cancel_releases_blocked_push_with_item() {
    let queue = BoundedQueue::new(1).unwrap();
    let token = queue.cancel_token();
    queue.push(1, &token).unwrap();

    let waiter_token = queue.cancel_token();
    let cancel = waiter_token.clone();
    let waiter_queue = queue.clone();
    let waiter = thread::spawn(move || waiter_queue.push(2, &waiter_token));

    thread::sleep(Duration::from_millis(100));
    cancel.cancel();

    assert_eq!(
        waiter.join().expect("waiter panicked"),
        Err(PushError::Interrupted(2))
    );
    assert_eq!(queue.len(), 1);
}

/// One consumer's cancellation must not disturb another's wait.
#[test]
fn cancel_only_stops_its_own_waiter() {
    let queue = BoundedQueue::new(1).unwrap();

    let cancelled_token = queue.cancel_token();
    let cancel = cancelled_token.clone();
    let cancelled_queue = queue.clone();
    let cancelled = thread::spawn(move || cancelled_queue.pop(&cancelled_token));

    let survivor_queue = queue.clone();
    let survivor = thread::spawn(move || {
        let token = survivor_queue.cancel_token();
        survivor_queue.pop(&token)
    });

    thread::sleep(Duration::from_millis(100));
    cancel.cancel();
    assert_eq!(cancelled.join().expect("waiter panicked"), Err(Interrupted));

    // The broadcast woke the survivor too, but its own token is clean, so
    // it re-checked its predicate and went back to waiting.
    let token = queue.cancel_token();
    queue.push(9, &token).unwrap();
    assert_eq!(survivor.join().expect("survivor panicked"), Ok(Some(9)));
}

/// A caller-imposed deadline is just a timer that cancels the token.
#[test]
fn deadline_as_cancellation_source() {
    let queue = BoundedQueue::<u32>::new(1).unwrap();
    let token = queue.cancel_token();

    let deadline_token = token.clone();
    let timer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        deadline_token.cancel();
    });

    assert_eq!(queue.pop(&token), Err(Interrupted));
    timer.join().expect("timer panicked");
}
