//! A set of high-level traits and types to abstract over the implementation details.

pub mod bulk;
pub mod store;

pub use bulk::BulkWriter;
pub use store::BulkStore;

pub use crate::utils::{EmptyError, StoreError, UnsupportedError};
