//  The slot buffer underlying the containers of this crate.
//
//  A container is an arrangement of occupied and vacant slots plus a few index fields; the buffer
//  itself knows nothing of the arrangement. Clearing on removal is part of the slot contract: a
//  taken slot is vacant again, and its value is dropped by the caller, exactly once.

use alloc::boxed::Box;

/// A fixed-capacity block of individually occupied or vacant slots.
///
/// The number of slots is fixed at allocation time. Growing and shrinking are performed by the
/// policy functions of [`storage`](crate::utils::storage), which allocate a fresh block and move
/// the contents over.
#[derive(Clone, Debug)]
pub struct Slots<T> {
    slots: Box<[Option<T>]>,
}

impl<T> Slots<T> {
    /// Creates an unallocated block, with a capacity of 0.
    pub fn new() -> Self {
        Self { slots: Box::default() }
    }

    /// Creates a block of `capacity` vacant slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = core::iter::repeat_with(|| None).take(capacity).collect();

        Self { slots }
    }

    /// Returns the number of slots of the block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns a reference to the value of the slot at `index`, or `None` if the slot is vacant.
    ///
    /// #   Panics
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots[index].as_ref()
    }

    /// Moves `value` into the slot at `index`, returning the previous occupant, if any.
    ///
    /// #   Panics
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub fn put(&mut self, index: usize, value: T) -> Option<T> {
        self.slots[index].replace(value)
    }

    /// Takes the value out of the slot at `index`, leaving the slot vacant.
    ///
    /// #   Panics
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub fn take(&mut self, index: usize) -> Option<T> {
        self.slots[index].take()
    }

    /// Returns the `length` slots starting at `start`.
    ///
    /// #   Panics
    ///
    /// If the range is out of bounds.
    #[inline]
    pub fn span(&self, start: usize, length: usize) -> &[Option<T>] {
        &self.slots[start..start + length]
    }

    /// Returns the `length` slots starting at `start`, mutably.
    ///
    /// #   Panics
    ///
    /// If the range is out of bounds.
    #[inline]
    pub fn span_mut(&mut self, start: usize, length: usize) -> &mut [Option<T>] {
        &mut self.slots[start..start + length]
    }

    /// Moves the contents of `length` slots of `source`, starting at `source_start`, into the
    /// slots of `self` starting at `start`, leaving the source slots vacant.
    ///
    /// Vacant source slots are moved as vacant, and previous occupants of the destination slots
    /// are dropped.
    ///
    /// #   Panics
    ///
    /// If either range is out of bounds.
    pub fn transfer(&mut self, source: &mut Self, source_start: usize, start: usize, length: usize) {
        for offset in 0..length {
            self.slots[start + offset] = source.slots[source_start + offset].take();
        }
    }
}

//
//  Common traits
//

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod slots_tests {
    use super::*;

    #[test]
    fn new_unallocated() {
        let slots = Slots::<i32>::new();

        assert_eq!(0, slots.capacity());
    }

    #[test]
    fn with_capacity_vacant() {
        let slots = Slots::<i32>::with_capacity(3);

        assert_eq!(3, slots.capacity());

        for index in 0..slots.capacity() {
            assert_eq!(None, slots.get(index), "{index}");
        }
    }

    #[test]
    fn put_take_round_trip() {
        let mut slots = Slots::with_capacity(2);

        assert_eq!(None, slots.put(1, 42));
        assert_eq!(Some(&42), slots.get(1));

        assert_eq!(Some(42), slots.take(1));
        assert_eq!(None, slots.get(1));
        assert_eq!(None, slots.take(1));
    }

    #[test]
    fn put_returns_previous() {
        let mut slots = Slots::with_capacity(1);

        assert_eq!(None, slots.put(0, 1));
        assert_eq!(Some(1), slots.put(0, 2));
        assert_eq!(Some(&2), slots.get(0));
    }

    #[test]
    fn span_windows() {
        let slots = filled(&[1, 2, 3, 4]);

        let span = slots.span(1, 2);

        assert_eq!([Some(2), Some(3)].as_slice(), span);
        assert!(slots.span(4, 0).is_empty());
    }

    #[test]
    fn transfer_moves_and_clears() {
        let mut source = filled(&[1, 2, 3, 4]);
        let mut destination = Slots::with_capacity(6);

        destination.transfer(&mut source, 1, 3, 2);

        assert_slots(&[None, None, None, Some(2), Some(3), None], &destination);
        assert_slots(&[Some(1), None, None, Some(4)], &source);
    }

    #[test]
    fn transfer_vacant_slots() {
        let mut source = Slots::with_capacity(2);
        let mut destination = filled(&[1, 2]);

        destination.transfer(&mut source, 0, 0, 2);

        assert_slots(&[None, None], &destination);
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds() {
        let slots = Slots::<i32>::with_capacity(2);

        let _ = slots.get(2);
    }

    #[test]
    #[should_panic]
    fn span_out_of_bounds() {
        let slots = Slots::<i32>::with_capacity(2);

        let _ = slots.span(1, 2);
    }

    #[test]
    #[should_panic]
    fn put_out_of_bounds() {
        let mut slots = Slots::with_capacity(2);

        slots.put(2, 1);
    }

    #[test]
    #[should_panic]
    fn take_out_of_bounds() {
        let mut slots = Slots::<i32>::with_capacity(2);

        let _ = slots.take(2);
    }

    #[test]
    #[should_panic]
    fn span_mut_out_of_bounds() {
        let mut slots = Slots::<i32>::with_capacity(2);

        let _ = slots.span_mut(1, 2);
    }

    #[test]
    #[should_panic]
    fn transfer_out_of_bounds() {
        let mut source = Slots::with_capacity(2);
        let mut destination = filled(&[1, 2]);

        destination.transfer(&mut source, 0, 1, 2);
    }

    fn filled(values: &[i32]) -> Slots<i32> {
        let mut slots = Slots::with_capacity(values.len());

        for (index, value) in values.iter().enumerate() {
            slots.put(index, *value);
        }

        slots
    }

    #[track_caller]
    fn assert_slots(expected: &[Option<i32>], slots: &Slots<i32>) {
        let actual: Vec<_> = (0..slots.capacity()).map(|index| slots.get(index).copied()).collect();

        assert_eq!(expected, actual.as_slice());
    }
} // mod slots_tests
