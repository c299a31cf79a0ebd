//! Implementations of bulk containers.

//  Design considerations
//
//  #   Why inherent?
//
//  The methods are doubly implemented (as inherent methods, and BulkStore methods) so they can be called without
//  importing the trait, and so the inherent versions can expose the narrow error types.

pub mod ballot;
pub mod bulk_queue;
pub mod bulk_stack;
pub mod fixed_view;

pub use ballot::{Ballot, Standings};
pub use bulk_queue::{BulkQueue, BulkQueueIter};
pub use bulk_stack::{BulkStack, BulkStackIter};
pub use fixed_view::FixedView;
