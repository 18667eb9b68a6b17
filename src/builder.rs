//! Fluent configuration for [`DaryHeap`]
//!
//! ```rust
//! use indexed_dary_heap::{DaryHeap, DaryHeapBuilder};
//!
//! let heap: DaryHeap<u32, u64> = DaryHeapBuilder::new()
//!     .arity(8)
//!     .capacity(1024)
//!     .build()
//!     .unwrap();
//! assert_eq!(heap.arity(), 8);
//! ```

use std::hash::Hash;

use crate::arity::{Arity, DEFAULT_ARITY};
use crate::dary::DaryHeap;
use crate::error::HeapError;

/// Builder for [`DaryHeap`]
///
/// Defaults to [`DEFAULT_ARITY`] children per node and no preallocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaryHeapBuilder {
    arity: usize,
    capacity: usize,
}

impl DaryHeapBuilder {
    /// Creates a builder with default settings
    pub fn new() -> Self {
        DaryHeapBuilder {
            arity: DEFAULT_ARITY,
            capacity: 0,
        }
    }

    /// Sets the number of children per node
    pub fn arity(mut self, d: usize) -> Self {
        self.arity = d;
        self
    }

    /// Sets the number of entries to preallocate room for
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds an empty heap
    ///
    /// # Errors
    /// Returns `HeapError::InvalidArity` if the configured arity is below 2.
    pub fn build<K, P>(self) -> Result<DaryHeap<K, P>, HeapError>
    where
        K: Eq + Hash + Clone,
        P: Ord,
    {
        let arity = Arity::new(self.arity)?;
        Ok(DaryHeap::from_arity(arity, self.capacity))
    }
}

impl Default for DaryHeapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let heap: DaryHeap<u32, u32> = DaryHeapBuilder::default().build().unwrap();
        assert_eq!(heap.arity(), DEFAULT_ARITY);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_invalid_arity_fails_at_build() {
        let result: Result<DaryHeap<u32, u32>, _> = DaryHeapBuilder::new().arity(1).build();
        assert_eq!(result.unwrap_err(), HeapError::InvalidArity);
    }

    #[test]
    fn test_configured_heap_is_usable() {
        let mut heap = DaryHeapBuilder::new().arity(2).capacity(16).build().unwrap();
        heap.insert("task", 3u8).unwrap();
        assert_eq!(heap.front(), Ok((&"task", &3)));
    }
}
