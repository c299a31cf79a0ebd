//! A circular first-in, first-out queue over a contiguous buffer.

use core::{
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    slice,
};

use crate::{
    api::{BulkStore, BulkWriter},
    utils::{EmptyError, Slots, StoreError, storage},
};

/// A circular first-in, first-out queue over a contiguous buffer.
///
/// Elements enter at the tail and leave at the head, and the two indexes chase each other around
/// the buffer, so that neither insertion nor removal ever moves an element. The buffer grows by
/// doubling when full, shrinks when utilization drops to a quarter, and every replacement
/// re-linearizes: the logical contents move to the front of the fresh buffer, in order.
///
/// #   Examples
///
/// ```
/// #   use bulk_collections::collections::BulkQueue;
/// let mut queue = BulkQueue::new();
///
/// queue.enqueue(1);
/// queue.enqueue(2);
///
/// assert_eq!(Ok(&1), queue.peek());
/// assert_eq!(Ok(1), queue.dequeue());
/// assert_eq!(Ok(2), queue.dequeue());
/// assert!(queue.dequeue().is_err());
/// ```
#[derive(Clone)]
pub struct BulkQueue<T> {
    //  Logical element `i` lives in slot `(head + i) % capacity`. `tail` is one past the newest
    //  element, and carries no meaning, along with `head`, when `count` is 0.
    slots: Slots<T>,
    head: usize,
    tail: usize,
    count: usize,
}

//
//  Creation
//

impl<T> BulkQueue<T> {
    /// Creates a new, empty, queue, without allocating.
    pub fn new() -> Self {
        Self { slots: Slots::new(), head: 0, tail: 0, count: 0 }
    }

    /// Creates a new, empty, queue, with a buffer of exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: Slots::with_capacity(capacity), head: 0, tail: 0, count: 0 }
    }
}

impl<T> Default for BulkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

//
//  BulkStore (inherent)
//

impl<T> BulkQueue<T> {
    /// Returns the number of elements of the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns whether the queue holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots of the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Inserts `item` at the tail of the queue, growing the buffer first if it is full.
    pub fn enqueue(&mut self, item: T) {
        if self.count == self.slots.capacity() {
            self.grow(1);
        }

        let previous = self.slots.put(self.tail, item);
        debug_assert!(previous.is_none(), "occupied slot at tail");

        self.tail = (self.tail + 1) % self.slots.capacity();
        self.count += 1;
    }

    /// Inserts every element of `items` at the tail of the queue, in order, growing the buffer at
    /// most once.
    ///
    /// An empty `items` leaves the queue untouched.
    ///
    /// #   Panics
    ///
    /// If `items` yields a different number of elements than its length claims.
    pub fn enqueue_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();

        let additional = items.len();

        if additional == 0 {
            return;
        }

        self.bulk_enqueue(additional, move |writer| {
            for item in items {
                writer.write(item);
            }
        });
    }

    /// Makes room for `additional` more elements, then lets `fill` write them in place.
    ///
    /// The span handed to `fill` is contiguous, covering the `additional` slots past the newest
    /// element: growth re-linearizes the buffer, and so does the rare in-capacity case where the
    /// span would otherwise wrap around.
    ///
    /// #   Panics
    ///
    /// If `additional` is 0, or if `fill` returns without writing the span in full.
    ///
    /// #   Examples
    ///
    /// ```
    /// #   use bulk_collections::collections::BulkQueue;
    /// let mut queue = BulkQueue::new();
    ///
    /// queue.bulk_enqueue(2, |writer| {
    ///     writer.write(1);
    ///     writer.write(2);
    /// });
    ///
    /// assert_eq!(2, queue.len());
    /// ```
    pub fn bulk_enqueue<F>(&mut self, additional: usize, fill: F)
    where
        F: FnOnce(&mut BulkWriter<'_, T>),
    {
        assert!(additional > 0, "additional elements required");

        self.make_room(additional);

        let mut writer = BulkWriter::new(self.slots.span_mut(self.tail, additional));

        fill(&mut writer);

        assert_eq!(additional, writer.written(), "the reserved span must be written in full");

        self.tail = (self.tail + additional) % self.slots.capacity();
        self.count += additional;
    }

    /// Removes and returns the element at the head of the queue, shrinking the buffer afterwards
    /// if utilization warrants it.
    ///
    /// Returns an error if the queue is empty, leaving it untouched.
    pub fn dequeue(&mut self) -> Result<T, EmptyError> {
        if self.count == 0 {
            return Err(EmptyError);
        }

        let item = self.slots.take(self.head).expect("occupied slot at head");

        self.head = (self.head + 1) % self.slots.capacity();
        self.count -= 1;

        self.shrink();

        Ok(item)
    }

    /// Returns a reference to the element at the head of the queue, without removing it.
    ///
    /// Returns an error if the queue is empty.
    pub fn peek(&self) -> Result<&T, EmptyError> {
        if self.count == 0 {
            return Err(EmptyError);
        }

        Ok(self.slots.get(self.head).expect("occupied slot at head"))
    }

    /// Removes every element of the queue and releases the buffer.
    pub fn clear(&mut self) {
        self.slots = Slots::new();
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Returns an iterator over the elements of the queue, oldest first.
    pub fn iter(&self) -> BulkQueueIter<'_, T> {
        let (leading, trailing) = if self.count > 0 && self.head >= self.tail {
            let leading = self.slots.capacity() - self.head;

            (self.slots.span(self.head, leading), self.slots.span(0, self.tail))
        } else {
            (self.slots.span(self.head, self.count), self.slots.span(0, 0))
        };

        BulkQueueIter { leading: leading.iter(), trailing: trailing.iter() }
    }
}

//
//  BulkStore (trait)
//

impl<T> BulkStore for BulkQueue<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.count
    }

    fn try_put(&mut self, item: T) -> Result<(), StoreError> {
        self.enqueue(item);

        Ok(())
    }

    fn try_take(&mut self) -> Result<T, StoreError> {
        self.dequeue().map_err(StoreError::from)
    }

    fn try_peek(&self) -> Result<&T, StoreError> {
        self.peek().map_err(StoreError::from)
    }

    fn try_put_all<I>(&mut self, items: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.enqueue_all(items);

        Ok(())
    }
}

//
//  Common traits
//

impl<T> fmt::Debug for BulkQueue<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Eq for BulkQueue<T> where T: Eq {}

impl<T> Hash for BulkQueue<T>
where
    T: Hash,
{
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.count.hash(state);

        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T> PartialEq for BulkQueue<T>
where
    T: PartialEq,
{
    //  Logical equality; the position of the elements within the buffer is immaterial.
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T> Extend<T> for BulkQueue<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T> FromIterator<T> for BulkQueue<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut queue = Self::new();

        queue.extend(iter);

        queue
    }
}

impl<'a, T> IntoIterator for &'a BulkQueue<T> {
    type Item = &'a T;
    type IntoIter = BulkQueueIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//
//  Iteration
//

/// An iterator over the elements of a `BulkQueue`, oldest first.
#[derive(Clone, Debug)]
pub struct BulkQueueIter<'a, T> {
    //  The logical contents are at most two runs of slots: from the head to the end of the
    //  buffer, then from the start of the buffer to the tail.
    leading: slice::Iter<'a, Option<T>>,
    trailing: slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for BulkQueueIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.leading.next().or_else(|| self.trailing.next())?;

        Some(slot.as_ref().expect("occupied slot in the logical range"))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let length = self.leading.len() + self.trailing.len();

        (length, Some(length))
    }

    fn count(self) -> usize {
        self.leading.len() + self.trailing.len()
    }
}

impl<'a, T> ExactSizeIterator for BulkQueueIter<'a, T> {}

impl<'a, T> FusedIterator for BulkQueueIter<'a, T> {}

//
//  Serde
//

#[cfg(feature = "serde")]
mod serde_impls {
    use core::{fmt, marker::PhantomData};

    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    use super::BulkQueue;

    //  The wire shape is the logical sequence, oldest first; the position of the elements within
    //  the buffer never leaks.

    //  A size hint comes straight from the wire, so preallocation from the hint alone is capped.
    const MAX_SIZE_HINT: usize = 4096;

    impl<T> Serialize for BulkQueue<T>
    where
        T: Serialize,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T> Deserialize<'de> for BulkQueue<T>
    where
        T: Deserialize<'de>,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(SeqVisitor(PhantomData))
        }
    }

    struct SeqVisitor<T>(PhantomData<fn() -> T>);

    impl<'de, T> de::Visitor<'de> for SeqVisitor<T>
    where
        T: Deserialize<'de>,
    {
        type Value = BulkQueue<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a sequence of elements")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let capacity = seq.size_hint().map_or(0, |size| size.min(MAX_SIZE_HINT));

            let mut queue = BulkQueue::with_capacity(capacity);

            while let Some(element) = seq.next_element()? {
                queue.enqueue(element);
            }

            Ok(queue)
        }
    }
} // mod serde_impls

//
//  Implementation
//

impl<T> BulkQueue<T> {
    //  Ensures `additional` more elements fit, and that the span which will receive them is
    //  contiguous, replacing the buffer if necessary.
    fn make_room(&mut self, additional: usize) {
        let capacity = self.slots.capacity();

        let free = capacity - self.count;

        if free < additional {
            self.grow(additional - free);
        } else if self.tail > capacity - additional {
            //  Room enough, but the span would wrap around the end of the buffer.
            self.relinearize();
        }
    }

    //  Grows the buffer to hold `deficit` more slots, re-linearizing the contents.
    fn grow(&mut self, deficit: usize) {
        let (head, tail, count) = (self.head, self.tail, self.count);

        storage::reserve_with(&mut self.slots, deficit, move |old, new| {
            Self::relocate(old, new, head, tail, count);
        });

        self.relinearized();
    }

    //  Shrinks the buffer if utilization warrants it, re-linearizing the contents.
    fn shrink(&mut self) {
        let (head, tail, count) = (self.head, self.tail, self.count);

        let shrunk = storage::shrink_with(&mut self.slots, count, move |old, new| {
            Self::relocate(old, new, head, tail, count);
        });

        if shrunk {
            self.relinearized();
        }
    }

    //  Replaces the buffer with a fresh one of the same capacity, re-linearizing the contents.
    fn relinearize(&mut self) {
        let (head, tail, count) = (self.head, self.tail, self.count);

        let mut fresh = Slots::with_capacity(self.slots.capacity());

        Self::relocate(&mut self.slots, &mut fresh, head, tail, count);

        self.slots = fresh;

        self.relinearized();
    }

    //  Moves the logical contents of `old` to the front of `new`, in order.
    fn relocate(old: &mut Slots<T>, new: &mut Slots<T>, head: usize, tail: usize, count: usize) {
        if count == 0 {
            return;
        }

        if head >= tail {
            //  Wrapped: the leading run extends to the end of the old buffer.
            let leading = old.capacity() - head;

            new.transfer(old, head, 0, leading);
            new.transfer(old, 0, leading, tail);
        } else {
            new.transfer(old, head, 0, count);
        }
    }

    //  Resets the indexes after the contents moved to the front of the buffer.
    fn relinearized(&mut self) {
        self.head = 0;
        self.tail = if self.count == self.slots.capacity() { 0 } else { self.count };
    }
}

// mod queue_tests

#[cfg(test)]
mod queue_growth_tests {
    use super::*;

    #[test]
    fn growth_amortized() {
        let mut queue = BulkQueue::new();

        let mut capacities = vec![queue.capacity()];

        for value in 0..1024 {
            queue.enqueue(value);

            if queue.capacity() != *capacities.last().unwrap() {
                capacities.push(queue.capacity());
            }
        }

        //  Nine reallocations for a thousand insertions.
        assert_eq!(vec![0, 4, 8, 16, 32, 64, 128, 256, 512, 1024], capacities);
    }

    #[test]
    fn fifo_across_wraps_and_growth() {
        let mut queue = BulkQueue::with_capacity(4);

        let mut drained = 0;
        let mut enqueued = 0;

        for _ in 0..4 {
            queue.enqueue(enqueued);
            enqueued += 1;
        }

        //  Two full revolutions of the indexes around the buffer.
        for _ in 0..2 {
            for _ in 0..2 {
                assert_eq!(Ok(drained), queue.dequeue());
                drained += 1;
            }

            for _ in 0..2 {
                queue.enqueue(enqueued);
                enqueued += 1;
            }
        }

        //  Grow while wrapped.
        queue.enqueue(enqueued);
        enqueued += 1;

        assert_eq!(8, queue.capacity());

        while let Ok(value) = queue.dequeue() {
            assert_eq!(drained, value);
            drained += 1;
        }

        assert_eq!(enqueued, drained);
    }

    #[test]
    fn shrink_at_quarter_only() {
        let mut queue = BulkQueue::with_capacity(12);

        for value in 0..12 {
            queue.enqueue(value);
        }

        //  A third of the capacity left: no shrink yet.
        while queue.len() > 4 {
            let _ = queue.dequeue();
        }

        assert_eq!(12, queue.capacity());

        //  A quarter: shrink to twice the count.
        let _ = queue.dequeue();

        assert_eq!(3, queue.len());
        assert_eq!(6, queue.capacity());

        assert_eq!(Ok(9), queue.dequeue());
    }

    #[test]
    fn shrink_releases_emptied() {
        let mut queue = BulkQueue::with_capacity(8);

        queue.enqueue(1);

        while queue.dequeue().is_ok() {}

        assert_eq!(0, queue.capacity());
    }

    #[test]
    fn with_capacity_holds_off_growth() {
        let mut queue = BulkQueue::with_capacity(5);

        for value in 0..5 {
            queue.enqueue(value);
        }

        assert_eq!(5, queue.capacity());

        queue.enqueue(5);

        assert_eq!(10, queue.capacity());
    }
} // mod queue_growth_tests

#[cfg(test)]
mod queue_bulk_tests {
    use super::*;

    #[test]
    fn bulk_enqueue_from_empty() {
        let mut queue = BulkQueue::new();

        queue.bulk_enqueue(3, |writer| {
            for value in 1..=3 {
                writer.write(value);
            }
        });

        assert_eq!(3, queue.len());
        assert_eq!(4, queue.capacity());
        assert_eq!(vec![1, 2, 3], drained(queue));
    }

    #[test]
    fn bulk_enqueue_grows_once() {
        let mut queue = BulkQueue::with_capacity(4);

        queue.enqueue(0);

        //  Doubling would not suffice: the capacity lands on the required minimum.
        queue.bulk_enqueue(9, |writer| {
            for value in 1..=9 {
                writer.write(value);
            }
        });

        assert_eq!(10, queue.capacity());
        assert_eq!((0..=9).collect::<Vec<_>>(), drained(queue));
    }

    #[test]
    fn bulk_enqueue_relinearizes_wrapped() {
        let mut queue = BulkQueue::with_capacity(4);

        for value in 0..4 {
            queue.enqueue(value);
        }

        for _ in 0..2 {
            let _ = queue.dequeue();
        }

        for value in 4..6 {
            queue.enqueue(value);
        }

        //  Wrapped and full; growing must stitch the two runs back together.
        queue.bulk_enqueue(3, |writer| {
            for value in 6..9 {
                writer.write(value);
            }
        });

        assert_eq!(8, queue.capacity());
        assert_eq!((2..9).collect::<Vec<_>>(), drained(queue));
    }

    #[test]
    fn bulk_enqueue_relinearizes_in_capacity() {
        let mut queue = BulkQueue::with_capacity(8);

        for value in 0..7 {
            queue.enqueue(value);
        }

        for _ in 0..2 {
            let _ = queue.dequeue();
        }

        //  Room for two, but the span would wrap: same capacity, fresh buffer.
        queue.bulk_enqueue(2, |writer| {
            writer.write(7);
            writer.write(8);
        });

        assert_eq!(8, queue.capacity());
        assert_eq!((2..9).collect::<Vec<_>>(), drained(queue));
    }

    #[test]
    fn bulk_matches_singles() {
        let mut singles = BulkQueue::with_capacity(4);
        let mut bulk = BulkQueue::with_capacity(4);

        for queue in [&mut singles, &mut bulk] {
            for value in 0..6 {
                queue.enqueue(value);
            }

            for _ in 0..2 {
                let _ = queue.dequeue();
            }
        }

        for value in 10..15 {
            singles.enqueue(value);
        }

        bulk.bulk_enqueue(5, |writer| {
            for value in 10..15 {
                writer.write(value);
            }
        });

        assert_eq!(singles, bulk);
    }

    #[test]
    fn bulk_grows_tighter_than_singles() {
        let mut singles = BulkQueue::with_capacity(4);
        let mut bulk = BulkQueue::with_capacity(4);

        for queue in [&mut singles, &mut bulk] {
            for value in 0..4 {
                queue.enqueue(value);
            }

            for _ in 0..2 {
                let _ = queue.dequeue();
            }
        }

        for value in 4..11 {
            singles.enqueue(value);
        }

        bulk.enqueue_all(4..11);

        //  The one growth lands on the required minimum; repeated doubling walks past it.
        assert_eq!(singles, bulk);
        assert_eq!(16, singles.capacity());
        assert_eq!(9, bulk.capacity());

        assert_eq!((2..11).collect::<Vec<_>>(), drained(bulk));
    }

    #[test]
    fn enqueue_all_at_once() {
        let mut queue = BulkQueue::new();

        queue.enqueue_all(0..5);

        assert_eq!(5, queue.len());
        assert_eq!(5, queue.capacity());

        queue.enqueue_all(Vec::new());

        assert_eq!(5, queue.len());
    }

    #[test]
    #[should_panic]
    fn bulk_enqueue_nothing() {
        let mut queue = BulkQueue::<i32>::new();

        queue.bulk_enqueue(0, |_| {});
    }

    #[test]
    #[should_panic]
    fn bulk_enqueue_underfilled() {
        let mut queue = BulkQueue::new();

        queue.bulk_enqueue(2, |writer| writer.write(1));
    }

    #[test]
    #[should_panic]
    fn bulk_enqueue_overfilled() {
        let mut queue = BulkQueue::new();

        queue.bulk_enqueue(1, |writer| {
            writer.write(1);
            writer.write(2);
        });
    }

    fn drained(mut queue: BulkQueue<i32>) -> Vec<i32> {
        let mut values = Vec::new();

        while let Ok(value) = queue.dequeue() {
            values.push(value);
        }

        values
    }
} // mod queue_bulk_tests

#[cfg(all(test, feature = "serde"))]
mod queue_serde_tests {
    use serde::{Deserialize, de::value};

    use super::*;

    #[test]
    fn round_trip_wrapped() {
        let mut queue = BulkQueue::with_capacity(4);

        for value in 0..4 {
            queue.enqueue(value);
        }

        let _ = queue.dequeue();
        queue.enqueue(4);

        let json = serde_json::to_string(&queue).expect("serializable queue");

        assert_eq!("[1,2,3,4]", json);

        let back: BulkQueue<i32> = serde_json::from_str(&json).expect("deserializable queue");

        assert_eq!(queue, back);
    }

    #[test]
    fn size_hint_capped() {
        let deserializer = value::SeqDeserializer::<_, value::Error>::new(Hinted(1..=3));

        let queue: BulkQueue<i32> = BulkQueue::deserialize(deserializer).expect("deserializable queue");

        assert_eq!(3, queue.len());
        assert_eq!(4096, queue.capacity());

        let collected: Vec<_> = queue.iter().copied().collect();

        assert_eq!(vec![1, 2, 3], collected);
    }

    //  Claims an outlandish length, while yielding only its actual elements.
    struct Hinted<I>(I);

    impl<I> Iterator for Hinted<I>
    where
        I: Iterator,
    {
        type Item = I::Item;

        fn next(&mut self) -> Option<Self::Item> {
            self.0.next()
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (usize::MAX, Some(usize::MAX))
        }
    }
} // mod queue_serde_tests
