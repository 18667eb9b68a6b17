//! Error type for heap operations

use thiserror::Error;

/// Error type for heap operations
///
/// Every variant describes a rejected precondition. A failed operation leaves
/// the heap exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum HeapError {
    /// The heap was constructed with an arity below 2
    #[error("heap arity (d) must be >= 2")]
    InvalidArity,
    /// An entry with the same identity is already in the heap
    #[error("an entry with this identity is already in the heap")]
    DuplicateIdentity,
    /// No entry with the given identity is in the heap
    #[error("no entry with this identity is in the heap")]
    ItemNotFound,
    /// `increase_priority` was given a priority that is not strictly more urgent
    #[error("new priority is not strictly lower than the current priority")]
    PriorityNotIncreased,
    /// `decrease_priority` was given a priority that is not strictly less urgent
    #[error("new priority is not strictly higher than the current priority")]
    PriorityNotDecreased,
    /// `pop` or `front` was called on an empty heap
    #[error("operation called on an empty heap")]
    EmptyQueue,
}
