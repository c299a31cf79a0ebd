//! A last-in, first-out stack over a contiguous buffer.

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

/// A last-in, first-out stack over a contiguous buffer.
///
/// Elements occupy the front of the buffer, newest on top; there is no wrap-around, so the buffer
/// moves contents only when it is replaced. It grows by doubling when full, and shrinks when
/// utilization drops to a quarter.
///
/// #   Examples
///
/// ```
/// #   use bulk_collections::collections::BulkStack;
/// let mut stack = BulkStack::new();
///
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(Ok(&2), stack.peek());
/// assert_eq!(Ok(2), stack.pop());
/// assert_eq!(Ok(1), stack.pop());
/// assert!(stack.pop().is_err());
/// ```
#[derive(Clone)]
pub struct BulkStack<T> {
    //  Elements occupy the slots below `count`, newest at `count - 1`.
    slots: Slots<T>,
    count: usize,
}

//
//  Creation
//

impl<T> BulkStack<T> {
    /// Creates a new, empty, stack, without allocating.
    pub fn new() -> Self {
        Self { slots: Slots::new(), count: 0 }
    }

    /// Creates a new, empty, stack, with a buffer of exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: Slots::with_capacity(capacity), count: 0 }
    }
}

impl<T> Default for BulkStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

//
//  BulkStore (inherent)
//

impl<T> BulkStack<T> {
    /// Returns the number of elements of the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns whether the stack holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots of the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Pushes `item` on top of the stack, growing the buffer first if it is full.
    pub fn push(&mut self, item: T) {
        if self.count == self.slots.capacity() {
            storage::reserve(&mut self.slots, 1);
        }

        let previous = self.slots.put(self.count, item);
        debug_assert!(previous.is_none(), "occupied slot at top");

        self.count += 1;
    }

    /// Pushes every element of `items` on the stack, in order, growing the buffer at most once.
    ///
    /// The last element of `items` ends on top. An empty `items` leaves the stack untouched.
    ///
    /// #   Panics
    ///
    /// If `items` yields a different number of elements than its length claims.
    pub fn push_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();

        let additional = items.len();

        if additional == 0 {
            return;
        }

        self.bulk_push(additional, move |writer| {
            for item in items {
                writer.write(item);
            }
        });
    }

    /// Makes room for `additional` more elements, then lets `fill` write them in place.
    ///
    /// The span handed to `fill` covers the `additional` slots above the current top; the first
    /// written element sits lowest, the last written ends on top.
    ///
    /// #   Panics
    ///
    /// If `additional` is 0, or if `fill` returns without writing the span in full.
    ///
    /// #   Examples
    ///
    /// ```
    /// #   use bulk_collections::collections::BulkStack;
    /// let mut stack = BulkStack::new();
    ///
    /// stack.bulk_push(2, |writer| {
    ///     writer.write(1);
    ///     writer.write(2);
    /// });
    ///
    /// assert_eq!(Ok(&2), stack.peek());
    /// ```
    pub fn bulk_push<F>(&mut self, additional: usize, fill: F)
    where
        F: FnOnce(&mut BulkWriter<'_, T>),
    {
        assert!(additional > 0, "additional elements required");

        let free = self.slots.capacity() - self.count;

        if free < additional {
            storage::reserve(&mut self.slots, additional - free);
        }

        let mut writer = BulkWriter::new(self.slots.span_mut(self.count, additional));

        fill(&mut writer);

        assert_eq!(additional, writer.written(), "the reserved span must be written in full");

        self.count += additional;
    }

    /// Removes and returns the element on top of the stack, shrinking the buffer afterwards if
    /// utilization warrants it.
    ///
    /// Returns an error if the stack is empty, leaving it untouched.
    pub fn pop(&mut self) -> Result<T, EmptyError> {
        if self.count == 0 {
            return Err(EmptyError);
        }

        self.count -= 1;

        let item = self.slots.take(self.count).expect("occupied slot below count");

        storage::shrink(&mut self.slots, self.count);

        Ok(item)
    }

    /// Returns a reference to the element on top of the stack, without removing it.
    ///
    /// Returns an error if the stack is empty.
    pub fn peek(&self) -> Result<&T, EmptyError> {
        if self.count == 0 {
            return Err(EmptyError);
        }

        Ok(self.slots.get(self.count - 1).expect("occupied slot below count"))
    }

    /// Removes every element of the stack and releases the buffer.
    pub fn clear(&mut self) {
        self.slots = Slots::new();
        self.count = 0;
    }

    /// Returns an iterator over the elements of the stack, bottom first.
    pub fn iter(&self) -> BulkStackIter<'_, T> {
        BulkStackIter { slots: self.slots.span(0, self.count).iter() }
    }
}

//
//  BulkStore (trait)
//

impl<T> BulkStore for BulkStack<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.count
    }

    fn try_put(&mut self, item: T) -> Result<(), StoreError> {
        self.push(item);

        Ok(())
    }

    fn try_take(&mut self) -> Result<T, StoreError> {
        self.pop().map_err(StoreError::from)
    }

    fn try_peek(&self) -> Result<&T, StoreError> {
        self.peek().map_err(StoreError::from)
    }

    fn try_put_all<I>(&mut self, items: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.push_all(items);

        Ok(())
    }
}

//
//  Common traits
//

impl<T> fmt::Debug for BulkStack<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Eq for BulkStack<T> where T: Eq {}

impl<T> Hash for BulkStack<T>
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

impl<T> PartialEq for BulkStack<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T> Extend<T> for BulkStack<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for BulkStack<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut stack = Self::new();

        stack.extend(iter);

        stack
    }
}

impl<'a, T> IntoIterator for &'a BulkStack<T> {
    type Item = &'a T;
    type IntoIter = BulkStackIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//
//  Iteration
//

/// An iterator over the elements of a `BulkStack`, bottom first.
#[derive(Clone, Debug)]
pub struct BulkStackIter<'a, T> {
    slots: slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for BulkStackIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.slots.next()?;

        Some(slot.as_ref().expect("occupied slot below count"))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }

    fn count(self) -> usize {
        self.slots.len()
    }
}

impl<'a, T> ExactSizeIterator for BulkStackIter<'a, T> {}

impl<'a, T> FusedIterator for BulkStackIter<'a, T> {}

//
//  Serde
//

#[cfg(feature = "serde")]
mod serde_impls {
    use core::{fmt, marker::PhantomData};

    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    use super::BulkStack;

    //  The wire shape is the logical sequence, bottom first, so replaying it push by push
    //  rebuilds the stack as it was.

    //  A size hint comes straight from the wire, so preallocation from the hint alone is capped.
    const MAX_SIZE_HINT: usize = 4096;

    impl<T> Serialize for BulkStack<T>
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

    impl<'de, T> Deserialize<'de> for BulkStack<T>
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
        type Value = BulkStack<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a sequence of elements")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let capacity = seq.size_hint().map_or(0, |size| size.min(MAX_SIZE_HINT));

            let mut stack = BulkStack::with_capacity(capacity);

            while let Some(element) = seq.next_element()? {
                stack.push(element);
            }

            Ok(stack)
        }
    }
} // mod serde_impls

// mod stack_tests

// mod stack_bulk_tests

// mod stack_serde_tests
