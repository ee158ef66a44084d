//! Flat, arena-backed binary search trees for Rust.
//!
//! This crate provides [`FlatBst`], an ordered set of unique values whose nodes live in one
//! contiguous arena and link to each other by index instead of by pointer. Positions are exposed
//! as generational [`Handle`]s that detect staleness instead of dangling.
//!
//! # Example
//!
//! ```
//! use flat_tree::FlatBst;
//!
//! let mut tree = FlatBst::new();
//! tree.insert_many([5, 2, 8, 1, 3, 7, 9]);
//!
//! let (three, _) = tree.insert(3);
//! assert_eq!(tree[three], 3);
//!
//! // Erasing a leaf invalidates exactly its handle.
//! let one = tree.find_handle(&1);
//! assert!(tree.erase(&1));
//! assert_eq!(tree.get(one), None);
//!
//! // Freed slots are reused by later insertions.
//! assert_eq!(tree.holes(), 1);
//! tree.insert(4);
//! assert_eq!(tree.holes(), 0);
//!
//! assert_eq!(tree.range(3..8).copied().collect::<Vec<_>>(), [3, 4, 5, 7]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Flat storage** - Every node sits in one `Vec`; erased slots go onto an intrusive free list
//! - **Generational handles** - A handle to an erased, reused, or rebuilt slot resolves to `None`
//! - **Pluggable ordering** - Any [`Compare`] implementation, including plain closures
//! - **Bulk construction** - Sorted input is laid out as a minimal-height tree in O(n)
//!
//! # Implementation
//!
//! Insertion and erasure follow the classic unbalanced BST algorithms, so monotone insertion
//! degrades the tree into a chain. [`FlatBst::rebalance`] rebuilds it into minimal-height shape
//! and compacts the arena. All traversals use explicit stacks, so even degenerate trees never
//! recurse.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod compare;
mod error;
mod handle;
mod raw;

pub mod flat_bst;

pub use compare::{Compare, Natural, ReverseOrder};
pub use error::Error;
pub use flat_bst::FlatBst;
pub use handle::Handle;
