//! Heap arity and slot navigation
//!
//! A d-ary heap stored in level order needs only two pieces of arithmetic:
//!
//! | Function           | Formula             |
//! |--------------------|---------------------|
//! | `parent(i)`        | `(i - 1) / d`       |
//! | `first_child(i)`   | `d * i + 1`         |
//!
//! The children of slot `i` are the `d` consecutive slots starting at
//! `first_child(i)`, clipped to the number of stored entries.
//!
//! # Example
//!
//! ```rust
//! use indexed_dary_heap::arity::Arity;
//!
//! let d = Arity::new(3).unwrap();
//! assert_eq!(d.parent(0), None);
//! assert_eq!(d.parent(4), Some(1));
//! assert_eq!(d.first_child(1), 4);
//! assert_eq!(d.children(1, 6), 4..6);
//! ```

use std::fmt;
use std::ops::Range;

use crate::error::HeapError;

/// Arity used when none is configured
pub const DEFAULT_ARITY: usize = 4;

/// Branching factor of a d-ary heap
///
/// Always at least 2. Fixed for the lifetime of a heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arity(usize);

impl Arity {
    /// Validates `d` as a heap arity
    ///
    /// # Errors
    /// Returns `HeapError::InvalidArity` if `d < 2`.
    pub fn new(d: usize) -> Result<Self, HeapError> {
        if d < 2 {
            return Err(HeapError::InvalidArity);
        }
        Ok(Arity(d))
    }

    /// Returns the branching factor
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Slot of the parent of `slot`, or `None` for the root
    #[inline]
    pub fn parent(self, slot: usize) -> Option<usize> {
        if slot == 0 {
            None
        } else {
            Some((slot - 1) / self.0)
        }
    }

    /// Slot of the first child of `slot`
    ///
    /// The result may lie past the end of the store; use [`Arity::children`]
    /// to get only the slots that exist. Saturates at `usize::MAX`, which no
    /// store can reach.
    #[inline]
    pub fn first_child(self, slot: usize) -> usize {
        self.0.saturating_mul(slot).saturating_add(1)
    }

    /// Slots holding the children of `slot` in a store of `len` entries
    ///
    /// Empty when `slot` is a leaf.
    #[inline]
    pub fn children(self, slot: usize, len: usize) -> Range<usize> {
        let first = self.first_child(slot).min(len);
        let end = first.saturating_add(self.0).min(len);
        first..end
    }

    /// Last slot that has at least one child in a store of `len` entries
    pub fn last_internal(self, len: usize) -> Option<usize> {
        if len < 2 {
            None
        } else {
            self.parent(len - 1)
        }
    }
}

impl Default for Arity {
    fn default() -> Self {
        Arity(DEFAULT_ARITY)
    }
}

impl TryFrom<usize> for Arity {
    type Error = HeapError;

    fn try_from(d: usize) -> Result<Self, Self::Error> {
        Arity::new(d)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
