//! The growth and shrink policy for slot buffers.
//!
//! The policy owns no data. Each operation allocates a fresh [`Slots`] block, moves the contents
//! over, and substitutes the block through the exclusive reference; the old and new blocks never
//! alias. Containers delegate every reallocation decision here, and customize the move step when
//! their arrangement is not a plain prefix, as the circular queue does.

use super::Slots;

/// The capacity first allocated when growing an unallocated buffer.
pub const DEFAULT_CAPACITY: usize = 4;

/// The ceiling applied to the doubling step of [`grown_capacity`].
///
/// A required minimum above the ceiling is returned as is; allocation then fails on the
/// allocator's own terms.
pub const MAX_CAPACITY: usize = isize::MAX as usize;

/// Returns the capacity to allocate for a buffer of capacity `capacity` which must accommodate
/// `additional` more slots.
///
/// Starts at [`DEFAULT_CAPACITY`] for an unallocated buffer, otherwise doubles the capacity,
/// clamping the result to [`MAX_CAPACITY`]. If the required minimum, `capacity + additional`,
/// exceeds the result, the required minimum is returned instead, with no extra headroom.
///
/// #   Panics
///
/// If `additional` is 0.
pub const fn grown_capacity(capacity: usize, additional: usize) -> usize {
    assert!(additional > 0, "additional slots required");

    let required = capacity.saturating_add(additional);

    let doubled = if capacity == 0 { DEFAULT_CAPACITY } else { capacity.saturating_mul(2) };
    let doubled = if doubled > MAX_CAPACITY { MAX_CAPACITY } else { doubled };

    if doubled < required { required } else { doubled }
}

/// Returns the capacity to reallocate a buffer of capacity `capacity` holding `count` elements to,
/// or `None` when shrinking is not warranted.
///
/// Shrinking requires utilization at or below a quarter, and a capacity above
/// [`DEFAULT_CAPACITY`]. The result is the smaller of half the capacity and twice the count, so a
/// shrunken buffer is at most half full, and a `count` of 0 shrinks the buffer to nothing.
pub const fn shrunken_capacity(capacity: usize, count: usize) -> Option<usize> {
    if capacity <= DEFAULT_CAPACITY {
        return None;
    }

    if count > capacity / 4 {
        return None;
    }

    let halved = capacity / 2;
    let doubled = count * 2;

    Some(if doubled < halved { doubled } else { halved })
}

/// Grows the buffer to hold `additional` more slots than its current capacity, moving the
/// contents of the old buffer into the new buffer at the same positions.
///
/// #   Panics
///
/// If `additional` is 0.
///
/// #   Examples
///
/// ```
/// #   use bulk_collections::utils::{storage, Slots};
/// let mut slots: Slots<i32> = Slots::new();
///
/// storage::reserve(&mut slots, 1);
/// assert_eq!(4, slots.capacity());
///
/// storage::reserve(&mut slots, 1);
/// assert_eq!(8, slots.capacity());
/// ```
pub fn reserve<T>(slots: &mut Slots<T>, additional: usize) {
    let capacity = slots.capacity();

    reserve_with(slots, additional, move |old, new| new.transfer(old, 0, 0, capacity));
}

/// Grows the buffer to hold `additional` more slots than its current capacity, letting the caller
/// move the contents over.
///
/// `relocate` receives the old buffer then the freshly allocated buffer, and is free to arrange
/// the contents of the new buffer as it sees fit.
///
/// #   Panics
///
/// If `additional` is 0.
pub fn reserve_with<T, F>(slots: &mut Slots<T>, additional: usize, relocate: F)
where
    F: FnOnce(&mut Slots<T>, &mut Slots<T>),
{
    let mut fresh = Slots::with_capacity(grown_capacity(slots.capacity(), additional));

    relocate(slots, &mut fresh);

    *slots = fresh;
}

/// Shrinks the buffer if warranted by [`shrunken_capacity`], moving the contents of the first
/// `count` slots over, and returns whether a reallocation happened.
///
/// #   Examples
///
/// ```
/// #   use bulk_collections::utils::{storage, Slots};
/// let mut slots: Slots<i32> = Slots::with_capacity(16);
///
/// assert!(storage::shrink(&mut slots, 2));
/// assert_eq!(4, slots.capacity());
///
/// assert!(!storage::shrink(&mut slots, 2));
/// ```
pub fn shrink<T>(slots: &mut Slots<T>, count: usize) -> bool {
    shrink_with(slots, count, move |old, new| new.transfer(old, 0, 0, count))
}

/// Shrinks the buffer if warranted by [`shrunken_capacity`], letting the caller move the contents
/// over, and returns whether a reallocation happened.
///
/// `relocate` receives the old buffer then the freshly allocated buffer, and is free to arrange
/// the contents of the new buffer as it sees fit.
pub fn shrink_with<T, F>(slots: &mut Slots<T>, count: usize, relocate: F) -> bool
where
    F: FnOnce(&mut Slots<T>, &mut Slots<T>),
{
    let Some(capacity) = shrunken_capacity(slots.capacity(), count) else {
        return false;
    };

    let mut fresh = Slots::with_capacity(capacity);

    relocate(slots, &mut fresh);

    *slots = fresh;

    true
}

/// Reallocates the buffer to exactly `length` slots, moving the contents of the first `copied`
/// slots over and discarding the rest.
///
/// #   Panics
///
/// If `copied` is not strictly less than `length`, or exceeds the current capacity.
pub fn resize<T>(slots: &mut Slots<T>, length: usize, copied: usize) {
    assert!(copied < length, "copied slots must leave room");
    assert!(copied <= slots.capacity(), "copied slots must exist");

    let mut fresh = Slots::with_capacity(length);

    fresh.transfer(slots, 0, 0, copied);

    *slots = fresh;
}

/// Reallocates the buffer to exactly `length` slots, moving the contents of the first `length`
/// slots over and discarding the rest.
///
/// #   Panics
///
/// If `length` is not strictly less than the current capacity.
pub fn truncate<T>(slots: &mut Slots<T>, length: usize) {
    assert!(length < slots.capacity(), "truncation must discard slots");

    let mut fresh = Slots::with_capacity(length);

    fresh.transfer(slots, 0, 0, length);

    *slots = fresh;
}

#[cfg(test)]
mod capacity_tests {
    use super::*;

    #[test]
    fn grown_default() {
        assert_eq!(DEFAULT_CAPACITY, grown_capacity(0, 1));
        assert_eq!(DEFAULT_CAPACITY, grown_capacity(0, 3));
    }

    #[test]
    fn grown_doubles() {
        assert_eq!(8, grown_capacity(4, 1));
        assert_eq!(16, grown_capacity(8, 7));
        assert_eq!(32, grown_capacity(16, 16));
    }

    #[test]
    fn grown_required_minimum() {
        //  Doubling falls short, the required minimum wins, with no headroom.
        assert_eq!(17, grown_capacity(4, 13));
        assert_eq!(6, grown_capacity(0, 6));
    }

    #[test]
    fn grown_clamped() {
        assert_eq!(MAX_CAPACITY, grown_capacity(MAX_CAPACITY / 2 + 1, 1));

        //  The required minimum overrides the clamp.
        assert_eq!(MAX_CAPACITY + 1, grown_capacity(MAX_CAPACITY, 1));
    }

    #[test]
    #[should_panic]
    fn grown_nothing() {
        let _ = grown_capacity(4, 0);
    }

    #[test]
    fn shrunken_small() {
        assert_eq!(None, shrunken_capacity(0, 0));
        assert_eq!(None, shrunken_capacity(2, 0));
        assert_eq!(None, shrunken_capacity(4, 0));
        assert_eq!(None, shrunken_capacity(4, 1));
    }

    #[test]
    fn shrunken_above_quarter() {
        assert_eq!(None, shrunken_capacity(8, 3));
        assert_eq!(None, shrunken_capacity(16, 5));
    }

    #[test]
    fn shrunken_at_quarter() {
        assert_eq!(Some(4), shrunken_capacity(8, 2));
        assert_eq!(Some(8), shrunken_capacity(16, 4));
    }

    #[test]
    fn shrunken_below_quarter() {
        assert_eq!(Some(2), shrunken_capacity(8, 1));
        assert_eq!(Some(4), shrunken_capacity(16, 2));
        assert_eq!(Some(0), shrunken_capacity(16, 0));
    }
} // mod capacity_tests

// mod storage_tests
