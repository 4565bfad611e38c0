//! Indexed binary min-heap with O(log n) reprioritization and removal.
//!
//! Stores `(score, id)` pairs in heap order and keeps a parallel `pos` table
//! mapping each dense id back to its current slot. Every sift updates the
//! table, so any element can be rescored or removed without scanning.
//!
//! ## Architecture
//!
//! ```text
//!   slots (heap order)            pos (id -> slot)
//!   ┌───────┬───────┬───────┐     ┌────┬────┬────┬────┐
//!   │ (1,2) │ (4,0) │ (3,1) │     │ 1  │ 2  │ 0  │ ∅  │
//!   └───────┴───────┴───────┘     └────┴────┴────┴────┘
//!      root                        id:  0    1    2    3
//! ```
//!
//! ## Operations
//! - `push(id, score)`: append and sift up
//! - `pop_min()`: remove the root; last slot replaces it and sifts down
//! - `update(id, score)`: rescore in place; sifts down, then up
//! - `remove(id)`: swap with the last slot, drop it, resift the swapped slot
//!
//! ## Performance
//! - `push` / `pop_min` / `update` / `remove`: O(log n)
//! - `score_of` / `position` / `contains`: O(1)
//!
//! Scores only need `PartialOrd`; incomparable scores (e.g. `f64::NAN`) are
//! not supported and will corrupt the ordering.
//!
//! `debug_validate_invariants()` is available in debug/test builds.

/// Sentinel marking an id with no slot in the heap.
const NO_SLOT: usize = usize::MAX;

#[derive(Debug)]
/// Min-heap over caller-assigned dense ids with an id → slot back-pointer
/// table.
///
/// Ids are expected to be small and reusable (e.g. arena slot indices); the
/// `pos` table grows to the largest id ever pushed.
pub struct IndexedMinHeap<S> {
    slots: Vec<(S, usize)>,
    pos: Vec<usize>,
}

impl<S> IndexedMinHeap<S>
where
    S: PartialOrd + Copy,
{
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            pos: Vec::new(),
        }
    }

    /// Creates an empty heap with reserved slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            pos: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if `id` is currently in the heap.
    pub fn contains(&self, id: usize) -> bool {
        self.slot_of(id).is_some()
    }

    /// Returns the current score of `id`, if present.
    pub fn score_of(&self, id: usize) -> Option<S> {
        self.slot_of(id).map(|slot| self.slots[slot].0)
    }

    /// Returns the heap slot currently holding `id`, if present.
    ///
    /// Slot 0 is the root (the minimum).
    pub fn position(&self, id: usize) -> Option<usize> {
        self.slot_of(id)
    }

    /// Returns the minimum `(id, score)` without removing it.
    pub fn peek_min(&self) -> Option<(usize, S)> {
        self.slots.first().map(|&(score, id)| (id, score))
    }

    /// Inserts `id` with `score` and sifts it up.
    ///
    /// `id` must not already be in the heap.
    pub fn push(&mut self, id: usize, score: S) {
        debug_assert!(!self.contains(id), "id {id} pushed twice");
        if self.pos.len() <= id {
            self.pos.resize(id + 1, NO_SLOT);
        }
        let slot = self.slots.len();
        self.slots.push((score, id));
        self.pos[id] = slot;
        self.sift_up(slot);
    }

    /// Removes and returns the minimum `(id, score)`.
    pub fn pop_min(&mut self) -> Option<(usize, S)> {
        if self.slots.is_empty() {
            return None;
        }
        let last = self.slots.len() - 1;
        self.slots.swap(0, last);
        let (score, id) = self.slots.pop()?;
        self.pos[id] = NO_SLOT;
        if !self.slots.is_empty() {
            self.pos[self.slots[0].1] = 0;
            self.sift_down(0);
        }
        Some((id, score))
    }

    /// Rescores `id` and restores heap order.
    ///
    /// Sifts down first, then up; only one direction actually moves.
    /// Returns `false` if `id` is not in the heap.
    pub fn update(&mut self, id: usize, score: S) -> bool {
        let Some(slot) = self.slot_of(id) else {
            return false;
        };
        self.slots[slot].0 = score;
        self.resift(slot);
        true
    }

    /// Removes `id` from the heap and returns its score.
    ///
    /// The last slot takes the vacated position and is resifted.
    pub fn remove(&mut self, id: usize) -> Option<S> {
        let slot = self.slot_of(id)?;
        let last = self.slots.len() - 1;
        self.slots.swap(slot, last);
        let (score, removed) = self.slots.pop()?;
        debug_assert_eq!(removed, id);
        self.pos[removed] = NO_SLOT;
        if slot < self.slots.len() {
            self.pos[self.slots[slot].1] = slot;
            self.resift(slot);
        }
        Some(score)
    }

    /// Iterates over `(id, score)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, S)> + '_ {
        self.slots.iter().map(|&(score, id)| (id, score))
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.pos.fill(NO_SLOT);
    }

    fn slot_of(&self, id: usize) -> Option<usize> {
        self.pos.get(id).copied().filter(|&slot| slot != NO_SLOT)
    }

    fn resift(&mut self, slot: usize) {
        self.sift_down(slot);
        self.sift_up(slot);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.slots[slot].0 < self.slots[parent].0 {
                self.swap_slots(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.slots.len() {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < self.slots.len() && self.slots[right].0 < self.slots[left].0 {
                child = right;
            }
            if self.slots[child].0 < self.slots[slot].0 {
                self.swap_slots(slot, child);
                slot = child;
            } else {
                break;
            }
        }
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.pos[self.slots[a].1] = a;
        self.pos[self.slots[b].1] = b;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let live = self.pos.iter().filter(|&&slot| slot != NO_SLOT).count();
        assert_eq!(live, self.slots.len());

        for (slot, &(_, id)) in self.slots.iter().enumerate() {
            assert_eq!(self.pos[id], slot, "back-pointer for id {id} is stale");
        }

        for slot in 1..self.slots.len() {
            let parent = (slot - 1) / 2;
            assert!(
                !(self.slots[slot].0 < self.slots[parent].0),
                "heap order violated between slots {parent} and {slot}"
            );
        }
    }
}

impl<S> Default for IndexedMinHeap<S>
where
    S: PartialOrd + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
