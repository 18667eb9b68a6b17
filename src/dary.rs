//! Indexed d-ary min-heap
//!
//! [`DaryHeap`] keeps two structures in lockstep:
//!
//! - the **store**, a `Vec<(K, P)>` holding the heap in level order, and
//! - the **position index**, an `FxHashMap<K, usize>` from each identity to
//!   the slot it currently occupies.
//!
//! Identity (`K`) decides whether two entries are the same; priority (`P`)
//! decides where an entry sits. Because the index tracks every slot, lookups
//! are O(1) and an existing entry can be re-prioritized in place without a
//! linear scan.
//!
//! # Time Complexity
//!
//! | Operation           | Complexity      |
//! |---------------------|-----------------|
//! | `insert`            | O(log_d n)      |
//! | `front` / `peek`    | O(1)            |
//! | `pop`               | O(d · log_d n)  |
//! | `increase_priority` | O(log_d n)      |
//! | `decrease_priority` | O(d · log_d n)  |
//! | `update_priority`   | O(d · log_d n)  |
//! | `remove`            | O(d · log_d n)  |
//! | `contains`          | O(1)            |
//!
//! # Example
//!
//! ```rust
//! use indexed_dary_heap::{DaryHeap, HeapError};
//!
//! let mut heap = DaryHeap::new(4).unwrap();
//! heap.insert("a", 50).unwrap();
//! heap.insert("b", 30).unwrap();
//! assert_eq!(heap.front(), Ok((&"b", &30)));
//!
//! heap.increase_priority("a", 5).unwrap();
//! assert_eq!(heap.front(), Ok((&"a", &5)));
//! assert_eq!(heap.increase_priority("a", 10), Err(HeapError::PriorityNotIncreased));
//!
//! assert_eq!(heap.pop(), Ok(("a", 5)));
//! assert_eq!(heap.pop(), Ok(("b", 30)));
//! assert_eq!(heap.pop(), Err(HeapError::EmptyQueue));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::arity::Arity;
use crate::error::HeapError;

/// A d-ary min-heap with O(1) lookup by identity
///
/// Lower priority values are more urgent and come out first. For max-heap
/// behavior wrap priorities in [`std::cmp::Reverse`].
///
/// Each identity may appear at most once. Priorities of stored entries can
/// only be changed through [`increase_priority`](Self::increase_priority),
/// [`decrease_priority`](Self::decrease_priority) or
/// [`update_priority`](Self::update_priority).
#[derive(Clone)]
pub struct DaryHeap<K, P> {
    /// Entries in level order
    entries: Vec<(K, P)>,
    /// Identity -> slot in `entries`
    positions: FxHashMap<K, usize>,
    arity: Arity,
}

impl<K, P> DaryHeap<K, P>
where
    K: Eq + Hash + Clone,
    P: Ord,
{
    /// Creates an empty heap with `d` children per node
    ///
    /// # Errors
    /// Returns `HeapError::InvalidArity` if `d < 2`.
    pub fn new(d: usize) -> Result<Self, HeapError> {
        Self::with_capacity(d, 0)
    }

    /// Creates an empty heap with room for `capacity` entries
    ///
    /// # Errors
    /// Returns `HeapError::InvalidArity` if `d < 2`.
    pub fn with_capacity(d: usize, capacity: usize) -> Result<Self, HeapError> {
        let arity = Arity::new(d)?;
        Ok(Self::from_arity(arity, capacity))
    }

    /// Creates a heap holding a single entry
    ///
    /// # Errors
    /// Returns `HeapError::InvalidArity` if `d < 2`.
    pub fn with_first(d: usize, key: K, priority: P) -> Result<Self, HeapError> {
        let mut heap = Self::with_capacity(d, 1)?;
        heap.positions.insert(key.clone(), 0);
        heap.entries.push((key, priority));
        Ok(heap)
    }

    pub(crate) fn from_arity(arity: Arity, capacity: usize) -> Self {
        trace!(d = arity.get(), capacity, "creating d-ary heap");
        DaryHeap {
            entries: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            arity,
        }
    }

    /// Returns the number of children per node
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity.get()
    }

    /// Returns the number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the heap holds no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if an entry with identity `key` is present
    ///
    /// Priority plays no part in the lookup.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(key)
    }

    /// Returns true if an entry with the same identity as `item` is present
    ///
    /// The priority half of `item` is ignored.
    #[inline]
    pub fn contains_item(&self, item: &(K, P)) -> bool {
        self.contains(&item.0)
    }

    /// Returns the stored priority for identity `key`
    pub fn priority_of<Q>(&self, key: &Q) -> Option<&P>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Returns the most urgent entry without removing it
    ///
    /// # Errors
    /// Returns `HeapError::EmptyQueue` if the heap is empty.
    pub fn front(&self) -> Result<(&K, &P), HeapError> {
        self.peek().ok_or(HeapError::EmptyQueue)
    }

    /// Returns the most urgent entry, or `None` if the heap is empty
    #[inline]
    pub fn peek(&self) -> Option<(&K, &P)> {
        self.entries.first().map(|(k, p)| (k, p))
    }

    /// Inserts a new entry
    ///
    /// Insert never overwrites: use the priority update operations to change
    /// an entry that is already present.
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateIdentity` if an entry with identity `key`
    /// is already present. The heap is left unchanged.
    pub fn insert(&mut self, key: K, priority: P) -> Result<(), HeapError> {
        if self.positions.contains_key(&key) {
            debug!(len = self.len(), "rejected insert of duplicate identity");
            return Err(HeapError::DuplicateIdentity);
        }
        let slot = self.entries.len();
        self.positions.insert(key.clone(), slot);
        self.entries.push((key, priority));
        self.sift_up(slot);
        Ok(())
    }

    /// Inserts every entry of `items`
    ///
    /// Either all entries are inserted or none are.
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateIdentity` if any identity is already
    /// present or occurs twice in `items`. The heap is left unchanged.
    pub fn insert_many<I>(&mut self, items: I) -> Result<(), HeapError>
    where
        I: IntoIterator<Item = (K, P)>,
    {
        let start = self.entries.len();
        for (key, priority) in items {
            if self.positions.contains_key(&key) {
                debug!(
                    batch = self.entries.len() - start,
                    "rejected bulk insert containing a duplicate identity"
                );
                self.truncate(start);
                return Err(HeapError::DuplicateIdentity);
            }
            self.positions.insert(key.clone(), self.entries.len());
            self.entries.push((key, priority));
        }

        let added = self.entries.len() - start;
        trace!(added, len = self.len(), "bulk insert");
        if added >= start {
            // Floyd: the batch dominates, rebuild bottom-up in O(n)
            self.heapify();
        } else {
            for slot in start..self.entries.len() {
                self.sift_up(slot);
            }
        }
        Ok(())
    }

    /// Removes and returns the most urgent entry
    ///
    /// # Errors
    /// Returns `HeapError::EmptyQueue` if the heap is empty.
    pub fn pop(&mut self) -> Result<(K, P), HeapError> {
        if self.entries.is_empty() {
            return Err(HeapError::EmptyQueue);
        }
        // The last entry takes over the root slot
        let (key, priority) = self.entries.swap_remove(0);
        self.positions.remove(&key);
        if !self.entries.is_empty() {
            self.reindex(0);
            self.sift_down(0);
        }
        Ok((key, priority))
    }

    /// Pops up to `count` entries in priority order
    pub fn pop_many(&mut self, count: usize) -> Vec<(K, P)> {
        let count = count.min(self.len());
        let mut popped = Vec::with_capacity(count);
        while popped.len() < count {
            match self.pop() {
                Ok(entry) => popped.push(entry),
                Err(_) => break,
            }
        }
        popped
    }

    /// Removes the entry with identity `key`, wherever it sits
    ///
    /// # Errors
    /// Returns `HeapError::ItemNotFound` if no such entry is present.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<(K, P), HeapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key)?;
        self.positions.remove(key);
        let (key, priority) = self.entries.swap_remove(slot);
        if slot < self.entries.len() {
            self.reindex(slot);
            self.restore(slot);
        }
        Ok((key, priority))
    }

    /// Makes the entry with identity `key` more urgent
    ///
    /// `new_priority` must be strictly lower than the stored priority. The
    /// entry can only move toward the root.
    ///
    /// # Errors
    /// - `HeapError::ItemNotFound` if no such entry is present
    /// - `HeapError::PriorityNotIncreased` if `new_priority` is not strictly
    ///   lower than the current priority
    ///
    /// The heap is left unchanged on error.
    pub fn increase_priority<Q>(&mut self, key: &Q, new_priority: P) -> Result<(), HeapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key)?;
        if new_priority >= self.entries[slot].1 {
            debug!(slot, "rejected increase_priority: priority not lowered");
            return Err(HeapError::PriorityNotIncreased);
        }
        self.entries[slot].1 = new_priority;
        self.sift_up(slot);
        Ok(())
    }

    /// Makes the entry with identity `key` less urgent
    ///
    /// `new_priority` must be strictly higher than the stored priority. The
    /// entry can only move toward the leaves.
    ///
    /// # Errors
    /// - `HeapError::ItemNotFound` if no such entry is present
    /// - `HeapError::PriorityNotDecreased` if `new_priority` is not strictly
    ///   higher than the current priority
    ///
    /// The heap is left unchanged on error.
    pub fn decrease_priority<Q>(&mut self, key: &Q, new_priority: P) -> Result<(), HeapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key)?;
        if new_priority <= self.entries[slot].1 {
            debug!(slot, "rejected decrease_priority: priority not raised");
            return Err(HeapError::PriorityNotDecreased);
        }
        self.entries[slot].1 = new_priority;
        self.sift_down(slot);
        Ok(())
    }

    /// Replaces the priority of `key` in either direction
    ///
    /// Returns the previous priority. Prefer the directional operations when
    /// the direction is known; they reject misuse and do half the work.
    ///
    /// # Errors
    /// Returns `HeapError::ItemNotFound` if no such entry is present.
    pub fn update_priority<Q>(&mut self, key: &Q, new_priority: P) -> Result<P, HeapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key)?;
        let old = mem::replace(&mut self.entries[slot].1, new_priority);
        self.restore(slot);
        Ok(old)
    }

    /// Removes every entry, keeping the arity
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing heap");
        self.entries.clear();
        self.positions.clear();
    }

    /// Iterates over entries in storage order
    ///
    /// Storage order is level order: the first entry is the most urgent, the
    /// rest are only partially ordered.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &P)> + '_ {
        self.entries.iter().map(|(k, p)| (k, p))
    }

    /// Consumes the heap, returning entries from most to least urgent
    pub fn into_sorted_vec(mut self) -> Vec<(K, P)> {
        let len = self.len();
        self.pop_many(len)
    }

    /// Checks the heap property and the position index
    ///
    /// Returns true when every entry is no more urgent than its parent, the
    /// index maps each stored identity to its slot, and the index holds no
    /// other identities.
    pub fn verify_invariants(&self) -> bool {
        if self.positions.len() != self.entries.len() {
            return false;
        }
        self.entries.iter().enumerate().all(|(slot, (key, priority))| {
            let indexed = self.positions.get(key) == Some(&slot);
            let ordered = self
                .arity
                .parent(slot)
                .map_or(true, |parent| self.entries[parent].1 <= *priority);
            indexed && ordered
        })
    }

    fn slot_of<Q>(&self, key: &Q) -> Result<usize, HeapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.positions.get(key) {
            Some(&slot) => Ok(slot),
            None => {
                debug!(len = self.len(), "identity not found");
                Err(HeapError::ItemNotFound)
            }
        }
    }

    /// Points the index entry of whatever sits in `slot` back at `slot`
    #[inline]
    fn reindex(&mut self, slot: usize) {
        let key = &self.entries[slot].0;
        if let Some(position) = self.positions.get_mut(key) {
            *position = slot;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.reindex(a);
        self.reindex(b);
    }

    /// Move entry at `slot` toward the root, returning its final slot
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while let Some(parent) = self.arity.parent(slot) {
            if self.entries[slot].1 < self.entries[parent].1 {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
        slot
    }

    /// Move entry at `slot` toward the leaves
    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let children = self.arity.children(slot, self.entries.len());
            // min_by keeps the leftmost of equal children
            let Some(best) = children.min_by(|&a, &b| self.entries[a].1.cmp(&self.entries[b].1))
            else {
                break;
            };
            if self.entries[best].1 < self.entries[slot].1 {
                self.swap(slot, best);
                slot = best;
            } else {
                break;
            }
        }
    }

    /// Re-establish order around `slot` when the direction is unknown
    fn restore(&mut self, slot: usize) {
        if self.sift_up(slot) == slot {
            self.sift_down(slot);
        }
    }

    fn heapify(&mut self) {
        if let Some(last) = self.arity.last_internal(self.entries.len()) {
            for slot in (0..=last).rev() {
                self.sift_down(slot);
            }
        }
    }

    /// Drop entries at `len..` and their index entries
    fn truncate(&mut self, len: usize) {
        for (key, _) in self.entries.drain(len..) {
            self.positions.remove(&key);
        }
    }
}

impl<K, P> Default for DaryHeap<K, P>
where
    K: Eq + Hash + Clone,
    P: Ord,
{
    fn default() -> Self {
        Self::from_arity(Arity::default(), 0)
    }
}

impl<K: fmt::Debug, P: fmt::Debug> fmt::Debug for DaryHeap<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaryHeap")
            .field("arity", &self.arity.get())
            .field("entries", &self.entries)
            .finish()
    }
}

impl<K: fmt::Display, P: fmt::Display> fmt::Display for DaryHeap<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, priority)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {priority}")?;
        }
        write!(f, "}}")
    }
}
