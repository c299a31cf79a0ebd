//  Errors.

use core::{error, fmt};

/// An error in taking or peeking an element from an empty container.
///
/// Emptiness is a legitimate runtime state, not a caller bug, hence an error rather than a panic.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EmptyError;

impl fmt::Display for EmptyError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str("EmptyError")
    }
}

impl error::Error for EmptyError {}

/// An error in mutating a container through an interface its storage does not support.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UnsupportedError;

impl fmt::Display for UnsupportedError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str("UnsupportedError")
    }
}

impl error::Error for UnsupportedError {}

/// An error in accessing a container through the `BulkStore` trait.
///
/// Concrete containers return the narrower `EmptyError` and `UnsupportedError` from their inherent
/// methods; this union exists so the trait can surface either through a single type.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StoreError {
    /// The container has no element to take or peek.
    Empty,
    /// The container's storage is read-only.
    Unsupported,
}

impl fmt::Display for StoreError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::Empty => f.write_str("StoreError::Empty"),
            Self::Unsupported => f.write_str("StoreError::Unsupported"),
        }
    }
}

impl error::Error for StoreError {}

impl From<EmptyError> for StoreError {
    #[inline]
    fn from(_: EmptyError) -> Self {
        Self::Empty
    }
}

impl From<UnsupportedError> for StoreError {
    #[inline]
    fn from(_: UnsupportedError) -> Self {
        Self::Unsupported
    }
}
