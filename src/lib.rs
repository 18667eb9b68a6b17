//! Indexed d-ary heap priority queue
//!
//! This crate provides [`DaryHeap`], a d-ary min-heap whose entries are
//! `(identity, priority)` pairs. A position index maps every identity to its
//! slot in the heap, which gives:
//!
//! - **O(1) membership** by identity, independent of priority
//! - **O(log_d n) in-place priority updates** without searching the heap
//! - **O(d · log_d n) removal** of the minimum or of any entry by identity
//!
//! Identity and priority are separate type parameters: identities need
//! `Eq + Hash + Clone`, priorities need `Ord`. Lower priorities are more
//! urgent; wrap priorities in [`std::cmp::Reverse`] for max-heap behavior.
//!
//! The arity `d` (children per node, at least 2) is fixed at construction.
//! Larger arities make the tree shallower, which speeds up `insert` and
//! `increase_priority` at the cost of scanning more children in `pop`.
//!
//! # Example
//!
//! ```rust
//! use indexed_dary_heap::{DaryHeap, HeapError};
//!
//! let mut heap = DaryHeap::new(4).unwrap();
//! for (task, priority) in [("parse", 30), ("fetch", 10), ("render", 50)] {
//!     heap.insert(task, priority).unwrap();
//! }
//!
//! assert_eq!(heap.insert("fetch", 1), Err(HeapError::DuplicateIdentity));
//! heap.increase_priority("render", 5).unwrap();
//!
//! assert_eq!(heap.pop(), Ok(("render", 5)));
//! assert_eq!(heap.pop(), Ok(("fetch", 10)));
//! assert!(heap.contains("parse"));
//! ```
//!
//! The heap is a plain owned value with no interior mutability; share it
//! across threads behind a `Mutex` if needed.

pub mod arity;
pub mod builder;
pub mod dary;
pub mod error;
pub mod pathfinding;

pub use arity::{Arity, DEFAULT_ARITY};
pub use builder::DaryHeapBuilder;
pub use dary::DaryHeap;
pub use error::HeapError;
