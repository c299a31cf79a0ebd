//! Bulk containers
//!
//! #   Organization
//!
//! This crate is composed of multiple top modules:
//!
//! -   The `api` top module contains a selection of vocabulary types and traits.
//! -   The `collections` module contains a selection of implementations of bulk containers.
//! -   The `utils` module contains a selection of low-level types upon which the implementations are built.
//!
//!
//! #   Slot storage
//!
//! The containers store their elements in a heap-allocated run of slots, each slot an `Option<T>`, and move elements
//! in and out of slots one at a time.
//!
//! #### Why not uninitialized memory?
//!
//! The classic layout stores bare elements in uninitialized memory, and tracks which elements are live on the side.
//! Doing so requires `unsafe` code, and a quantity of care in the face of panics and leaks.
//!
//! A slot, on the other hand, knows whether it is occupied, so vacating and relocating elements is plain safe code,
//! and a mistake surfaces as a panic or a stray `None` rather than undefined behavior.
//!
//! #### Why not `Vec<T>`?
//!
//! A `Vec` grows on its own schedule. The containers in this crate promise an exact growth and shrink discipline,
//! so they manage their runs of slots themselves, and `Vec` would only get in the way.
//!
//!
//! #   Bulk writes
//!
//! The containers accept batches through a writer over a reserved span of slots, so a batch settles its full
//! capacity requirement up front, in a single relocation, rather than one element at a time.

#![cfg_attr(not(test), no_std)]
//  Lints
#![deny(missing_docs)]
//  This author prefers to keep its test modules close to what they are testing.
#![allow(clippy::items_after_test_module)]

extern crate alloc;

pub mod api;
pub mod collections;
pub mod utils;
