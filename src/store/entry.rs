//! Entry store: arena-owned cache entries fused with the key index.
//!
//! Owns every resident entry (key, value, hit count, size) in a slot-reusing
//! arena and maps each key to the [`EntryId`] currently holding it. Policies
//! keep eviction order elsewhere (see [`IndexedMinHeap`]) and reference
//! entries only through their ids, so there is no cyclic ownership: the
//! arena owns, everything else points.
//!
//! [`IndexedMinHeap`]: crate::ds::IndexedMinHeap
//!
//! ## Architecture
//!
//! ```text
//!   slots: Vec<Option<CacheEntry>>          index: FxHashMap<K, EntryId>
//!
//!   id: 0        1        2        3        ┌───────┬────┐
//!       [k="a"]  [ ]      [k="c"]  [ ]      │  "a"  │ 0  │
//!                 ^                 ^       │  "c"  │ 2  │
//!                 |                 |       └───────┴────┘
//!             free_list = [1, 3]
//! ```
//!
//! Invariant: a key is in the index if and only if a live slot holds an
//! entry with that key.
//!
//! ## Operations
//! - `allocate(key, value, size)`: fills a free slot (or grows), indexes the
//!   key, and starts the hit count at 1
//! - `lookup(&key)`: key → id through the index
//! - `release(id)`: removes the entry and its index record, frees the slot
//! - `iter()`: live `(EntryId, &CacheEntry)` pairs
//!
//! ## Performance
//! - `allocate` / `lookup` / `release` / `get` / `get_mut`: O(1) average
//! - `iter`: O(slots)
//!
//! Ids are reused after release, so a stale `EntryId` held across a release
//! may observe a different entry; the policy layer never holds ids across
//! mutations.
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

/// Stable handle to a resident cache entry.
///
/// Valid from `allocate` until the matching `release`; the underlying index
/// may be reused afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    /// Returns the underlying slot index.
    ///
    /// Used as the dense id in the eviction heap.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One resident cache entry.
///
/// The hit count starts at 1 on allocation (the insert counts as the first
/// hit) and only grows while the entry is resident. `size` is the capacity
/// charge computed by the policy when the value was stored.
#[derive(Debug)]
pub struct CacheEntry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hits: u64,
    pub(crate) size: f64,
}

impl<K, V> CacheEntry<K, V> {
    /// Returns the entry's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the entry's value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the entry's hit count (≥ 1).
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns the entry's capacity charge.
    pub fn size(&self) -> f64 {
        self.size
    }
}

/// Snapshot of store activity counters.
///
/// All fields are cumulative since store creation (or the last
/// [`EntryStore::clear`], which does not reset them).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    /// Successful lookups that counted as a hit.
    pub hits: u64,
    /// Failed lookups.
    pub misses: u64,
    /// New entry allocations.
    pub inserts: u64,
    /// In-place value updates for existing keys.
    pub updates: u64,
    /// Explicit removals.
    pub removes: u64,
    /// Policy-driven evictions.
    pub evictions: u64,
}

/// Activity counters using relaxed atomics for low-overhead increments.
#[derive(Debug, Default)]
struct StoreCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    removes: AtomicU64,
    evictions: AtomicU64,
}

impl StoreCounters {
    fn snapshot(&self) -> StoreMetrics {
        StoreMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug)]
/// Arena of cache entries plus the key → id index.
pub struct EntryStore<K, V> {
    slots: Vec<Option<CacheEntry<K, V>>>,
    free_list: Vec<usize>,
    index: FxHashMap<K, EntryId>,
    counters: StoreCounters,
}

impl<K, V> EntryStore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            index: FxHashMap::default(),
            counters: StoreCounters::default(),
        }
    }

    /// Creates an empty store with reserved capacity for slots and index.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            counters: StoreCounters::default(),
        }
    }

    /// Allocates a fresh entry for `key` and returns its id.
    ///
    /// The hit count starts at 1. `key` must not already be present; callers
    /// route updates through [`get_mut`](Self::get_mut) instead.
    pub fn allocate(&mut self, key: K, value: V, size: f64) -> EntryId {
        debug_assert!(!self.index.contains_key(&key), "key allocated twice");
        let entry = CacheEntry {
            key: key.clone(),
            value,
            hits: 1,
            size,
        };
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(entry);
            idx
        } else {
            self.slots.push(Some(entry));
            self.slots.len() - 1
        };
        let id = EntryId(idx);
        self.index.insert(key, id);
        self.counters.inserts.fetch_add(1, Ordering::Relaxed);
        id
    }

    /// Returns the id currently holding `key`, if resident.
    pub fn lookup(&self, key: &K) -> Option<EntryId> {
        self.index.get(key).copied()
    }

    /// Removes the entry at `id`, un-indexes its key, and frees the slot.
    pub fn release(&mut self, id: EntryId) -> Option<CacheEntry<K, V>> {
        let slot = self.slots.get_mut(id.0)?;
        let entry = slot.take()?;
        self.index.remove(&entry.key);
        self.free_list.push(id.0);
        Some(entry)
    }

    /// Returns a shared reference to the entry at `id`, if live.
    pub fn get(&self, id: EntryId) -> Option<&CacheEntry<K, V>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Returns a mutable reference to the entry at `id`, if live.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut CacheEntry<K, V>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterates over live `(EntryId, &CacheEntry)` pairs in unspecified
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &CacheEntry<K, V>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|entry| (EntryId(idx), entry)))
    }

    /// Removes all entries and index records.
    ///
    /// Activity counters are preserved.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.index.clear();
    }

    /// Returns a snapshot of the store's activity counters.
    pub fn metrics(&self) -> StoreMetrics {
        self.counters.snapshot()
    }

    /// Records a successful lookup.
    pub fn record_hit(&self) {
        self.counters.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed lookup.
    pub fn record_miss(&self) {
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an in-place value update.
    pub fn record_update(&self) {
        self.counters.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an explicit removal.
    pub fn record_remove(&self) {
        self.counters.removes.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a policy-driven eviction.
    ///
    /// Separate from [`record_remove`](Self::record_remove) so callers can
    /// distinguish eviction pressure from user-initiated deletion.
    pub fn record_eviction(&self) {
        self.counters.evictions.fetch_add(1, Ordering::Relaxed);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.index.len());
        assert_eq!(self.slots.len(), self.free_list.len() + live);

        for (key, &id) in &self.index {
            let entry = self.get(id).expect("index points at empty slot");
            assert!(entry.key == *key, "index key does not match entry key");
            assert!(entry.hits >= 1, "resident entry with zero hits");
        }

        let mut seen_free = std::collections::HashSet::new();
        for &idx in &self.free_list {
            assert!(idx < self.slots.len());
            assert!(self.slots[idx].is_none());
            assert!(seen_free.insert(idx));
        }
    }
}

impl<K, V> Default for EntryStore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_lookup_release_roundtrip() {
        let mut store = EntryStore::new();
        let id = store.allocate("a", 10, 2.0);
        assert_eq!(store.lookup(&"a"), Some(id));
        assert_eq!(store.len(), 1);

        let entry = store.get(id).unwrap();
        assert_eq!(entry.key(), &"a");
        assert_eq!(entry.value(), &10);
        assert_eq!(entry.hits(), 1);
        assert_eq!(entry.size(), 2.0);

        let released = store.release(id).unwrap();
        assert_eq!(released.value, 10);
        assert_eq!(store.lookup(&"a"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn released_slots_are_reused() {
        let mut store = EntryStore::new();
        let a = store.allocate("a", 1, 1.0);
        let _b = store.allocate("b", 2, 1.0);
        store.release(a);

        let c = store.allocate("c", 3, 1.0);
        assert_eq!(c.index(), a.index());
        assert_eq!(store.len(), 2);
        store.debug_validate_invariants();
    }

    #[test]
    fn release_unindexes_the_key() {
        let mut store = EntryStore::new();
        let a = store.allocate("a", 1, 1.0);
        store.release(a);
        assert!(store.release(a).is_none());
        assert_eq!(store.lookup(&"a"), None);

        store.allocate("a", 2, 1.0);
        assert_eq!(store.len(), 1);
        store.debug_validate_invariants();
    }

    #[test]
    fn get_mut_updates_entry_fields() {
        let mut store = EntryStore::new();
        let id = store.allocate("a", 1, 1.0);
        {
            let entry = store.get_mut(id).unwrap();
            entry.value = 9;
            entry.hits += 1;
            entry.size = 3.0;
        }
        let entry = store.get(id).unwrap();
        assert_eq!(entry.value(), &9);
        assert_eq!(entry.hits(), 2);
        assert_eq!(entry.size(), 3.0);
    }

    #[test]
    fn iter_skips_freed_slots() {
        let mut store = EntryStore::new();
        store.allocate("a", 1, 1.0);
        let b = store.allocate("b", 2, 1.0);
        store.allocate("c", 3, 1.0);
        store.release(b);

        let mut keys: Vec<_> = store.iter().map(|(_, e)| *e.key()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn clear_resets_entries_but_keeps_metrics() {
        let mut store = EntryStore::new();
        store.allocate("a", 1, 1.0);
        store.record_hit();
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.lookup(&"a"), None);
        assert_eq!(store.metrics().inserts, 1);
        assert_eq!(store.metrics().hits, 1);
        store.debug_validate_invariants();
    }

    #[test]
    fn counters_accumulate() {
        let mut store = EntryStore::new();
        store.allocate("a", 1, 1.0);
        store.record_hit();
        store.record_miss();
        store.record_update();
        store.record_remove();
        store.record_eviction();

        let metrics = store.metrics();
        assert_eq!(metrics.inserts, 1);
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 1);
        assert_eq!(metrics.updates, 1);
        assert_eq!(metrics.removes, 1);
        assert_eq!(metrics.evictions, 1);
    }
}
