/// Receives items.
pub trait Sink<T> {
    /// Consume one item.
    fn accept(&mut self, item: T);

    /// Consume multiple items from an iterator.
    ///
    /// Default implementation calls `accept` for each item.
    /// Implementors can override for batch optimizations.
    #[inline]
    fn accept_all(&mut self, items: impl Iterator<Item = T>) {
        for item in items {
            self.accept(item);
        }
    }

    /// Called once when the feeding side stops, normally or not.
    ///
    /// Default is a no-op. Buffering implementors can use this to emit
    /// whatever is pending.
    #[inline]
    fn finish(&mut self) {}
}
