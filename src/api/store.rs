//! A generic bulk store.

use crate::utils::StoreError;

/// An ordered store of elements, accessed at its ends.
///
/// The trait is the contract collaborators program against when they do not care which container
/// backs the store: a count, an emptiness check, insertion and removal at an end, and a peek at
/// the element removal would surface next. Insertion and removal sites are fixed per implementer:
/// a FIFO store takes from the opposite end it puts to, a LIFO store from the same end.
///
/// Every method that touches the store is fallible, because not every implementer supports every
/// access: a store backed by read-only storage reports [`StoreError::Unsupported`] from its
/// mutators rather than silently dropping the request, and an empty store reports
/// [`StoreError::Empty`] from `try_take` and `try_peek`. Concrete containers also expose the same
/// operations as inherent methods with narrower error types, and those are the first choice when
/// the concrete type is at hand.
pub trait BulkStore {
    /// The type of the stored elements.
    type Item;

    /// Returns the number of elements of the store.
    fn len(&self) -> usize;

    /// Returns whether the store holds no element.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `item` at the insertion end of the store.
    fn try_put(&mut self, item: Self::Item) -> Result<(), StoreError>;

    /// Removes and returns the element at the removal end of the store.
    fn try_take(&mut self) -> Result<Self::Item, StoreError>;

    /// Returns a reference to the element `try_take` would remove, without removing it.
    fn try_peek(&self) -> Result<&Self::Item, StoreError>;

    /// Inserts every element of `items` at the insertion end of the store, in order.
    ///
    /// The number of elements must be known up front, so implementers can make room once and
    /// write once. This default implementation inserts one element at a time instead, stopping at
    /// the first error; implementers with a bulk path override it.
    fn try_put_all<I>(&mut self, items: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = Self::Item>,
        I::IntoIter: ExactSizeIterator,
        Self: Sized,
    {
        for item in items {
            self.try_put(item)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod store_tests {
    use crate::collections::{BulkQueue, BulkStack};

    use super::*;

    #[test]
    fn queue_takes_oldest() {
        let mut queue = BulkQueue::new();

        assert_eq!(vec![1, 2, 3, 4], drained(&mut queue));
    }

    #[test]
    fn stack_takes_newest() {
        let mut stack = BulkStack::new();

        assert_eq!(vec![4, 3, 2, 1], drained(&mut stack));
    }

    //  Fills the store through the trait, then drains it, peeking before each take.
    fn drained<S>(store: &mut S) -> Vec<i32>
    where
        S: BulkStore<Item = i32>,
    {
        for value in 1..3 {
            store.try_put(value).expect("writable store");
        }

        store.try_put_all(3..5).expect("writable store");

        assert_eq!(4, store.len());
        assert!(!store.is_empty());

        let mut values = Vec::new();

        while !store.is_empty() {
            let peeked = *store.try_peek().expect("occupied store");
            let taken = store.try_take().expect("occupied store");

            assert_eq!(peeked, taken);

            values.push(taken);
        }

        assert_eq!(Err(StoreError::Empty), store.try_take());
        assert_eq!(Err(StoreError::Empty), store.try_peek().copied());

        values
    }
} // mod store_tests
