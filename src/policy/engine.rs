//! Aged eviction engine shared by the LFU, LFUDA, and GDSF policies.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────────┐
//!   │                     AgedCache<K, V, P>                          │
//!   │                                                                 │
//!   │   EntryStore<K, V>                 IndexedMinHeap<f64>          │
//!   │   ┌──────────────────────┐         ┌──────────────────────┐     │
//!   │   │ id → (key, value,    │◄───────►│ id ordered by        │     │
//!   │   │       hits, size)    │   ids   │ priority, id → slot  │     │
//!   │   │ key → id             │         │ back-pointers        │     │
//!   │   └──────────────────────┘         └──────────────────────┘     │
//!   │                                                                 │
//!   │   used: Σ entry sizes        age: priority of the last victim   │
//!   └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation flows through the engine: it consults the key index,
//! mutates entries in the store, and reorders the heap. The policy `P` only
//! supplies two pure functions (the capacity charge of a value and the
//! priority of an entry), so all three policies share this code with static
//! dispatch and no per-operation virtual calls.
//!
//! ## Dynamic aging
//!
//! `age` starts at 0 and is set to the victim's priority on every eviction.
//! LFUDA and GDSF fold the current age into every priority they compute, so
//! entries admitted late start at the floor the last victim set, and a
//! popular-but-stale entry can no longer pin capacity forever: the floor
//! eventually overtakes its accumulated hits. `age` never decreases except
//! across [`purge`](AgedCache::purge), and explicit
//! [`remove`](AgedCache::remove) does not advance it: age tracks eviction
//! pressure, not deletion.
//!
//! ## Complexity
//!
//! `set` / `get` / `remove` and each eviction are O(log n); `peek` /
//! `contains` / `len` / `size` / `age` are O(1); `keys` is O(n log n).

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::ds::IndexedMinHeap;
use crate::error::{ConfigError, InvariantError};
use crate::store::entry::{EntryId, EntryStore, StoreMetrics};
use crate::store::weight::Weigh;

/// Callback invoked with the key and value of every entry that leaves the
/// cache through eviction, [`remove`](AgedCache::remove), or
/// [`purge`](AgedCache::purge).
///
/// The entry has already left the index, the heap, and the size accumulator
/// when the callback runs, and the callback must return quickly. It must
/// not call back into the cache: the synchronized shells hold a
/// non-reentrant lock for the duration of the call.
pub type EvictCallback<K, V> = Box<dyn Fn(&K, &V) + Send + Sync>;

/// Error returned by [`AgedCache::try_set`] when a value's capacity charge
/// alone exceeds the whole cache capacity.
///
/// [`AgedCache::set`] signals the same condition by returning `false`
/// without admitting the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTooLarge;

/// Eviction policy plugged into [`AgedCache`].
///
/// A policy is a zero-sized descriptor supplying the capacity charge of a
/// value and the priority of an entry. Lower priority means "more
/// evictable"; the insert-time priority is `priority(age, 1, size)` since
/// the hit count starts at 1.
pub trait AgingPolicy {
    /// Short policy name used in `Debug` output.
    const NAME: &'static str;

    /// Priority of an entry given the current cache age, its hit count, and
    /// its size.
    fn priority(age: f64, hits: u64, size: f64) -> f64;

    /// Capacity charge for a value.
    ///
    /// Defaults to the value's [`Weigh`] weight clamped to at least 1, so an
    /// empty value cannot escape capacity accounting or produce a division
    /// by zero in size-aware priorities.
    fn entry_size<V: Weigh>(value: &V) -> f64 {
        value.weight().max(1) as f64
    }
}

/// Fixed-capacity cache with frequency-biased, dynamically aged eviction.
///
/// Capacity is a byte budget over the policy's entry sizes (see
/// [`Weigh`]); when an insertion would exceed it, minimum-priority entries
/// are evicted until the new entry fits. Use the per-policy aliases
/// ([`LfuCache`], [`LfudaCache`], [`GdsfCache`]) rather than naming the
/// engine directly.
///
/// [`LfuCache`]: crate::policy::lfu::LfuCache
/// [`LfudaCache`]: crate::policy::lfuda::LfudaCache
/// [`GdsfCache`]: crate::policy::gdsf::GdsfCache
///
/// # Example
///
/// ```
/// use freqkit::policy::lfuda::LfudaCache;
///
/// let mut cache: LfudaCache<u64, &str> = LfudaCache::new(2.0);
/// assert!(!cache.set(1, "a"));
/// assert!(!cache.set(2, "b"));
///
/// cache.get(&1);
/// // Key 2 has the lower priority and is the victim.
/// assert!(cache.set(3, "c"));
/// assert!(cache.contains(&1));
/// assert!(!cache.contains(&2));
/// ```
pub struct AgedCache<K, V, P: AgingPolicy> {
    store: EntryStore<K, V>,
    heap: IndexedMinHeap<f64>,
    capacity: f64,
    used: f64,
    age: f64,
    on_evict: Option<EvictCallback<K, V>>,
    policy: PhantomData<P>,
}

pub(crate) fn validate_capacity(capacity: f64) -> Result<f64, ConfigError> {
    if capacity.is_finite() && capacity > 0.0 {
        Ok(capacity)
    } else {
        Err(ConfigError::new(format!(
            "capacity must be positive and finite, got {capacity}"
        )))
    }
}

impl<K, V, P> AgedCache<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Weigh,
    P: AgingPolicy,
{
    /// Creates a cache with the given byte capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not positive and finite; use
    /// [`try_new`](Self::try_new) for a fallible variant.
    pub fn new(capacity: f64) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a cache that invokes `on_evict` for every departing entry.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not positive and finite; use
    /// [`try_with_evict`](Self::try_with_evict) for a fallible variant.
    pub fn with_evict(capacity: f64, on_evict: impl Fn(&K, &V) + Send + Sync + 'static) -> Self {
        match Self::try_with_evict(capacity, on_evict) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible variant of [`new`](Self::new).
    pub fn try_new(capacity: f64) -> Result<Self, ConfigError> {
        Ok(Self::build(validate_capacity(capacity)?, None))
    }

    /// Fallible variant of [`with_evict`](Self::with_evict).
    pub fn try_with_evict(
        capacity: f64,
        on_evict: impl Fn(&K, &V) + Send + Sync + 'static,
    ) -> Result<Self, ConfigError> {
        Ok(Self::build(
            validate_capacity(capacity)?,
            Some(Box::new(on_evict) as EvictCallback<K, V>),
        ))
    }

    pub(crate) fn build(capacity: f64, on_evict: Option<EvictCallback<K, V>>) -> Self {
        Self {
            store: EntryStore::new(),
            heap: IndexedMinHeap::new(),
            capacity,
            used: 0.0,
            age: 0.0,
            on_evict,
            policy: PhantomData,
        }
    }

    /// Stores `key → value`, evicting minimum-priority entries until the new
    /// entry fits. Returns `true` if at least one eviction occurred.
    ///
    /// If `key` is already resident the value is replaced in place, the
    /// size adjusted, and the access counted as a hit; updates never evict,
    /// so a growing update can leave [`size`](Self::size) above capacity
    /// until the next admission corrects it. A new entry whose size alone
    /// exceeds the capacity is not admitted and `false` is returned; use
    /// [`try_set`](Self::try_set) to observe that case explicitly.
    pub fn set(&mut self, key: K, value: V) -> bool {
        let size = P::entry_size(&value);
        self.set_sized(key, value, size)
    }

    /// Like [`set`](Self::set), but reports an oversized entry as an error
    /// instead of silently refusing it.
    pub fn try_set(&mut self, key: K, value: V) -> Result<bool, EntryTooLarge> {
        let size = P::entry_size(&value);
        if size > self.capacity && self.store.lookup(&key).is_none() {
            return Err(EntryTooLarge);
        }
        Ok(self.set_sized(key, value, size))
    }

    /// Returns the value for `key` and counts a hit, raising the entry's
    /// priority under the current age.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(id) = self.store.lookup(key) else {
            self.store.record_miss();
            return None;
        };
        let (hits, size) = {
            let entry = self.store.get_mut(id)?;
            entry.hits += 1;
            (entry.hits, entry.size)
        };
        self.heap.update(id.index(), P::priority(self.age, hits, size));
        self.store.record_hit();
        self.store.get(id).map(|entry| &entry.value)
    }

    /// Returns the value for `key` without touching hit count, priority,
    /// heap position, or age.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = self.store.lookup(key)?;
        self.store.get(id).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is resident, without mutating anything.
    pub fn contains(&self, key: &K) -> bool {
        self.store.lookup(key).is_some()
    }

    /// Checks for `key` and stores the value only if absent.
    ///
    /// Returns `(was_present, set_result)` where `set_result` is
    /// [`set`](Self::set)'s return value (`false` when nothing was stored).
    pub fn contains_or_set(&mut self, key: K, value: V) -> (bool, bool) {
        if self.contains(&key) {
            (true, false)
        } else {
            let evicted = self.set(key, value);
            (false, evicted)
        }
    }

    /// Peeks at `key` and stores the value only if absent.
    ///
    /// Returns `(previous, set_result)`: the resident value without counting
    /// a hit, or `None` plus [`set`](Self::set)'s return value when the key
    /// was absent.
    pub fn peek_or_set(&mut self, key: K, value: V) -> (Option<&V>, bool) {
        if let Some(id) = self.store.lookup(&key) {
            (self.store.get(id).map(|entry| &entry.value), false)
        } else {
            let evicted = self.set(key, value);
            (None, evicted)
        }
    }

    /// Removes `key`, firing the eviction callback if one is installed.
    ///
    /// Returns whether the key was present. Does not advance the age.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(id) = self.store.lookup(key) else {
            return false;
        };
        self.heap.remove(id.index());
        let Some(entry) = self.store.release(id) else {
            return false;
        };
        self.used -= entry.size;
        self.store.record_remove();
        if let Some(on_evict) = &self.on_evict {
            on_evict(&entry.key, &entry.value);
        }
        true
    }

    /// Removes every entry, firing the callback for each, and resets the
    /// size accumulator and the age to zero.
    pub fn purge(&mut self) {
        if let Some(on_evict) = &self.on_evict {
            for (_, entry) in self.store.iter() {
                on_evict(&entry.key, &entry.value);
            }
        }
        self.store.clear();
        self.heap.clear();
        self.used = 0.0;
        self.age = 0.0;
    }

    /// Returns all resident keys ordered from highest priority (most
    /// desirable) to lowest (next eviction candidate).
    ///
    /// Ordering among equal priorities is unspecified.
    pub fn keys(&self) -> Vec<K> {
        let mut ranked: Vec<(f64, K)> = self
            .heap
            .iter()
            .filter_map(|(idx, priority)| {
                self.store
                    .get(EntryId(idx))
                    .map(|entry| (priority, entry.key.clone()))
            })
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        ranked.into_iter().map(|(_, key)| key).collect()
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the sum of resident entry sizes.
    pub fn size(&self) -> f64 {
        self.used
    }

    /// Returns the current cache age: the priority of the most recently
    /// evicted entry, or 0 if nothing has been evicted since creation or
    /// the last [`purge`](Self::purge).
    pub fn age(&self) -> f64 {
        self.age
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Returns the hit count for `key`, if resident.
    pub fn hits(&self, key: &K) -> Option<u64> {
        let id = self.store.lookup(key)?;
        self.store.get(id).map(|entry| entry.hits)
    }

    /// Returns the current priority for `key`, if resident.
    pub fn priority(&self, key: &K) -> Option<f64> {
        let id = self.store.lookup(key)?;
        self.heap.score_of(id.index())
    }

    /// Returns a snapshot of the cache's activity counters.
    pub fn metrics(&self) -> StoreMetrics {
        self.store.metrics()
    }

    fn set_sized(&mut self, key: K, value: V, size: f64) -> bool {
        if let Some(id) = self.store.lookup(&key) {
            self.update_in_place(id, value, size);
            return false;
        }
        if size > self.capacity {
            return false;
        }
        let mut evicted = false;
        while self.used + size > self.capacity {
            if !self.evict_min() {
                break;
            }
            evicted = true;
        }
        let id = self.store.allocate(key, value, size);
        self.heap.push(id.index(), P::priority(self.age, 1, size));
        self.used += size;
        evicted
    }

    fn update_in_place(&mut self, id: EntryId, value: V, size: f64) {
        let Some(entry) = self.store.get_mut(id) else {
            return;
        };
        self.used += size - entry.size;
        entry.value = value;
        entry.size = size;
        entry.hits += 1;
        let hits = entry.hits;
        self.heap.update(id.index(), P::priority(self.age, hits, size));
        self.store.record_update();
    }

    /// Evicts the minimum-priority entry and advances the age to its
    /// priority. Returns `false` on an empty cache.
    fn evict_min(&mut self) -> bool {
        let Some((idx, priority)) = self.heap.pop_min() else {
            return false;
        };
        self.age = priority;
        let Some(entry) = self.store.release(EntryId(idx)) else {
            return false;
        };
        self.used -= entry.size;
        self.store.record_eviction();
        if let Some(on_evict) = &self.on_evict {
            on_evict(&entry.key, &entry.value);
        }
        true
    }

    /// Verifies the cache's structural invariants.
    ///
    /// Checks that the entry count, key index, and heap agree, that every
    /// resident entry has a heap slot, and that the size accumulator matches
    /// the sum of entry sizes. Intended for tests and debugging; it is O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.store.len() != self.heap.len() {
            return Err(InvariantError::new(format!(
                "store holds {} entries but heap holds {}",
                self.store.len(),
                self.heap.len()
            )));
        }

        let mut accounted = 0.0;
        for (id, entry) in self.store.iter() {
            if !self.heap.contains(id.index()) {
                return Err(InvariantError::new(
                    "resident entry has no heap slot".to_string(),
                ));
            }
            accounted += entry.size;
        }
        if (accounted - self.used).abs() > 1e-9 {
            return Err(InvariantError::new(format!(
                "size accumulator drifted: entries sum to {accounted}, tracked {}",
                self.used
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.store.debug_validate_invariants();
        self.heap.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }
}

impl<K, V, P> fmt::Debug for AgedCache<K, V, P>
where
    P: AgingPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgedCache")
            .field("policy", &P::NAME)
            .field("capacity", &self.capacity)
            .field("used", &self.used)
            .field("age", &self.age)
            .field("len", &self.heap.len())
            .finish_non_exhaustive()
    }
}
