//! Kani verification proofs for DaryHeap
//!
//! Kani is AWS's model checker for Rust. These harnesses check the heap and
//! position-index invariants for all inputs up to small bounds.
//!
//! To run these proofs:
//!   cargo kani --tests

#[cfg(kani)]
use indexed_dary_heap::{DaryHeap, HeapError};

/// Proof that insert always increments the length
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_insert_increments_len() {
    let mut heap: DaryHeap<u8, u8> = DaryHeap::new(2).unwrap();
    heap.insert(0, kani::any()).unwrap();
    heap.insert(1, kani::any()).unwrap();
    let initial_len = heap.len();

    heap.insert(2, kani::any()).unwrap();

    assert!(heap.len() == initial_len + 1);
    assert!(heap.verify_invariants());
}

/// Proof that a duplicate insert is rejected without changing the heap
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_duplicate_insert_is_noop() {
    let mut heap: DaryHeap<u8, u8> = DaryHeap::new(3).unwrap();
    let key: u8 = kani::any();
    let first: u8 = kani::any();
    heap.insert(key, first).unwrap();

    assert!(heap.insert(key, kani::any()) == Err(HeapError::DuplicateIdentity));
    assert!(heap.len() == 1);
    assert!(heap.priority_of(&key) == Some(&first));
}

/// Proof that pop returns the minimum of three arbitrary priorities
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_pop_returns_minimum() {
    let mut heap: DaryHeap<u8, u8> = DaryHeap::new(2).unwrap();
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();
    heap.insert(0, a).unwrap();
    heap.insert(1, b).unwrap();
    heap.insert(2, c).unwrap();

    let (key, priority) = heap.pop().unwrap();
    assert!(priority <= a && priority <= b && priority <= c);
    assert!(!heap.contains(&key));
    assert!(heap.len() == 2);
    assert!(heap.verify_invariants());
}

/// Proof that increase_priority either succeeds and keeps invariants or
/// fails without touching the stored priority
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_increase_priority_contract() {
    let mut heap: DaryHeap<u8, u8> = DaryHeap::new(2).unwrap();
    heap.insert(0, kani::any()).unwrap();
    heap.insert(1, kani::any()).unwrap();
    heap.insert(2, kani::any()).unwrap();

    let old = *heap.priority_of(&2).unwrap();
    let new: u8 = kani::any();
    match heap.increase_priority(&2, new) {
        Ok(()) => {
            assert!(new < old);
            assert!(heap.priority_of(&2) == Some(&new));
        }
        Err(e) => {
            assert!(e == HeapError::PriorityNotIncreased);
            assert!(heap.priority_of(&2) == Some(&old));
        }
    }
    assert!(heap.verify_invariants());
}

/// Proof that front and pop on an empty heap signal EmptyQueue
#[cfg(kani)]
#[kani::proof]
fn verify_empty_heap_signals() {
    let mut heap: DaryHeap<u8, u8> = DaryHeap::new(2).unwrap();
    assert!(heap.front() == Err(HeapError::EmptyQueue));
    assert!(heap.pop() == Err(HeapError::EmptyQueue));
}

/// Proof that arities below 2 are always rejected
#[cfg(kani)]
#[kani::proof]
fn verify_arity_validation() {
    let d: usize = kani::any();
    let result: Result<DaryHeap<u8, u8>, HeapError> = DaryHeap::new(d);
    assert!(result.is_ok() == (d >= 2));
}
