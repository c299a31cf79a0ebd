//! Utilities for implementers of bulk containers.

mod error;
mod slots;

pub mod storage;

pub use error::{EmptyError, StoreError, UnsupportedError};
pub use slots::Slots;
