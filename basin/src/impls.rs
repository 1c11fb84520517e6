use alloc::vec::Vec;

use crate::Sink;

/// Discards all items.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropSink;

impl<T> Sink<T> for DropSink {
    #[inline]
    fn accept(&mut self, _item: T) {}
}

/// Accumulates items into a Vec, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct CollectSink<T> {
    items: Vec<T>,
}

impl<T> CollectSink<T> {
    /// Create a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Accumulated items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Take accumulated items, leaving an empty Vec.
    pub fn take(&mut self) -> Vec<T> {
        core::mem::take(&mut self.items)
    }

    /// Consume the sink and return the accumulated items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> Sink<T> for CollectSink<T> {
    #[inline]
    fn accept(&mut self, item: T) {
        self.items.push(item);
    }

    #[inline]
    fn accept_all(&mut self, items: impl Iterator<Item = T>) {
        self.items.extend(items);
    }
}

/// Calls a closure for each item.
#[derive(Debug)]
pub struct FnSink<F>(pub F);

impl<T, F: FnMut(T)> Sink<T> for FnSink<F> {
    #[inline]
    fn accept(&mut self, item: T) {
        (self.0)(item);
    }
}
