//! A write cursor for bulk insertion.

/// A write cursor over a reserved span of slots.
///
/// Bulk insertion hands one of these to the caller after making room: the container grows once,
/// the caller writes once, element by element, with no intermediate buffer. The cursor only moves
/// forward, and refuses to run past the reserved span; the container checks on return that the
/// span was written in full, so a callback writing fewer elements than promised is a bug caught
/// at the call site.
///
/// #   Examples
///
/// ```
/// #   use bulk_collections::collections::BulkQueue;
/// let mut queue = BulkQueue::new();
///
/// queue.bulk_enqueue(3, |writer| {
///     for value in 0..3 {
///         writer.write(value);
///     }
/// });
///
/// assert_eq!(3, queue.len());
/// assert_eq!(Ok(&0), queue.peek());
/// ```
#[derive(Debug)]
pub struct BulkWriter<'a, T> {
    slots: &'a mut [Option<T>],
    written: usize,
}

impl<'a, T> BulkWriter<'a, T> {
    /// Creates a cursor over `slots`, positioned at the first slot.
    ///
    /// The slots are expected to be vacant.
    pub(crate) fn new(slots: &'a mut [Option<T>]) -> Self {
        Self { slots, written: 0 }
    }

    /// Writes `value` into the next slot, and moves past it.
    ///
    /// #   Panics
    ///
    /// If the reserved span is already written in full.
    pub fn write(&mut self, value: T) {
        assert!(self.written < self.slots.len(), "write beyond the reserved span");

        let previous = self.slots[self.written].replace(value);
        debug_assert!(previous.is_none(), "occupied slot in a reserved span");

        self.written += 1;
    }

    /// Returns the number of slots written so far.
    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the number of slots left to write.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.slots.len() - self.written
    }
}

// mod bulk_tests
