//! A read-only, fixed-size, view implementing the store contract.

use core::slice;

use alloc::{boxed::Box, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    api::BulkStore,
    utils::StoreError,
};

/// A read-only, fixed-size, view over a run of elements.
///
/// The view implements the store contract for code written against it, with every mutating
/// operation reporting `StoreError::Unsupported` and leaving the elements untouched. Reads are
/// served in construction order.
///
/// #   Examples
///
/// ```
/// #   use bulk_collections::api::BulkStore;
/// #   use bulk_collections::collections::FixedView;
/// #   use bulk_collections::utils::StoreError;
/// let mut view: FixedView<_> = [1, 2, 3].into_iter().collect();
///
/// assert_eq!(Err(StoreError::Unsupported), view.try_put(4));
/// assert_eq!(Err(StoreError::Unsupported), view.try_take());
///
/// assert_eq!(Ok(&1), view.try_peek());
/// assert_eq!(3, view.len());
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FixedView<T> {
    elements: Box<[T]>,
}

//
//  Creation
//

impl<T> FixedView<T> {
    /// Creates a view over the elements of `elements`, in order.
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self { elements: elements.into_iter().collect() }
    }
}

impl<T> Default for FixedView<T> {
    fn default() -> Self {
        Self { elements: Box::default() }
    }
}

impl<T> From<Box<[T]>> for FixedView<T> {
    fn from(elements: Box<[T]>) -> Self {
        Self { elements }
    }
}

impl<T> From<Vec<T>> for FixedView<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements: elements.into_boxed_slice() }
    }
}

impl<T> FromIterator<T> for FixedView<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(iter)
    }
}

//
//  BulkStore (inherent)
//

impl<T> FixedView<T> {
    /// Returns the number of elements in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns a reference to the element at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// Returns the elements of the view, in order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns an iterator over the elements of the view, in order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.iter()
    }
}

//
//  BulkStore (trait)
//

impl<T> BulkStore for FixedView<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.len()
    }

    fn try_put(&mut self, _item: T) -> Result<(), StoreError> {
        Err(StoreError::Unsupported)
    }

    fn try_put_all<I>(&mut self, _items: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Err(StoreError::Unsupported)
    }

    fn try_take(&mut self) -> Result<T, StoreError> {
        Err(StoreError::Unsupported)
    }

    fn try_peek(&self) -> Result<&T, StoreError> {
        self.elements.first().ok_or(StoreError::Empty)
    }
}

//
//  Common traits
//

impl<'a, T> IntoIterator for &'a FixedView<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// mod fixed_view_tests

// mod fixed_view_serde_tests
