//! Allocator-aware containers for Rust.
//!
//! This crate provides a growable contiguous array ([`Vector`]), an ordered
//! red-black tree multiset with rank queries ([`RbTree`]) and a LIFO adapter
//! ([`Stack`]). Every byte they own comes from an [`Allocator`], and every
//! operation that may need memory reports failure as an [`Error`] instead of
//! aborting.
//!
//! # Example
//!
//! ```
//! use raw_containers::{RbTree, Rank, Vector};
//!
//! let mut v = Vector::new();
//! for i in [5, 3, 8, 1] {
//!     v.push(i)?;
//! }
//! assert_eq!(v.capacity(), 4);
//! assert_eq!(v.at(4), Err(raw_containers::Error::OutOfRange { index: 4, len: 4 }));
//!
//! let tree: RbTree<_> = v.iter().copied().collect();
//! assert_eq!(tree.first(), Some(&1));
//! assert_eq!(tree[Rank(2)], 5);
//! assert_eq!(tree.rank_of(&8), Some(3));
//! # Ok::<(), raw_containers::Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Pluggable allocation** - [`DefaultAllocator`] is bundled, [`StdAllocator`] adapts any
//!   `allocator_api2` allocator
//! - **Fallible growth** - Allocation failures leave the container unchanged
//! - **O(log n) rank operations** - Subtree sizes are maintained through every rotation

#![no_std]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg(test)]
#[macro_use]
extern crate std;

extern crate alloc;

mod order_statistic;
mod raw;

pub mod allocator;
pub mod compare;
pub mod error;
pub mod rb_tree;
pub mod stack;
pub mod vector;

pub use allocator::{Allocator, DefaultAllocator, StdAllocator};
pub use compare::{Compare, Natural};
pub use error::{Error, Result};
pub use order_statistic::Rank;
pub use rb_tree::RbTree;
pub use stack::{BackSequence, Stack};
pub use vector::Vector;
