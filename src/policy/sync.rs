//! Thread-safe shell around the aged eviction engine.
//!
//! Wraps [`AgedCache`] in a `parking_lot::RwLock` and serializes every
//! operation behind it: read-only operations (`peek`, `contains`, `keys`,
//! `len`, `size`, `age`) take the read lock, mutating operations (`set`,
//! `get` (which counts a hit), `remove`, `purge`, and the compound
//! `contains_or_set` / `peek_or_set`) take the write lock, so the compound
//! forms are atomic with respect to all other callers.
//!
//! Values are returned by clone so they can outlive the lock guard; wrap
//! large values in `Arc` to make that clone cheap.
//!
//! The eviction callback runs while the write lock is held. It must not
//! call back into the cache: the lock is not reentrant and doing so will
//! deadlock.

use std::hash::Hash;

use parking_lot::RwLock;

use crate::error::ConfigError;
use crate::policy::engine::{AgedCache, AgingPolicy, EntryTooLarge};
use crate::policy::gdsf::Gdsf;
use crate::policy::lfu::Lfu;
use crate::policy::lfuda::Lfuda;
use crate::store::entry::StoreMetrics;
use crate::store::weight::Weigh;
use crate::traits::ConcurrentCache;

/// Thread-safe cache evicting by least frequency with dynamic aging.
pub type SyncLfudaCache<K, V> = SyncAgedCache<K, V, Lfuda>;

/// Thread-safe cache evicting by frequency-per-byte with dynamic aging.
pub type SyncGdsfCache<K, V> = SyncAgedCache<K, V, Gdsf>;

/// Thread-safe cache evicting by least frequency, without aging.
pub type SyncLfuCache<K, V> = SyncAgedCache<K, V, Lfu>;

/// Lock-guarded [`AgedCache`] safe to share across threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use freqkit::policy::sync::SyncLfudaCache;
///
/// let cache: Arc<SyncLfudaCache<u64, u64>> = Arc::new(SyncLfudaCache::new(100.0));
///
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let cache = Arc::clone(&cache);
///         thread::spawn(move || {
///             for i in 0..25u64 {
///                 cache.set(t * 25 + i, i);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert!(cache.len() <= 100);
/// assert!(cache.size() <= 100.0);
/// ```
#[derive(Debug)]
pub struct SyncAgedCache<K, V, P: AgingPolicy> {
    inner: RwLock<AgedCache<K, V, P>>,
}

impl<K, V, P> SyncAgedCache<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Weigh + Clone,
    P: AgingPolicy,
{
    /// Creates a cache with the given byte capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not positive and finite; use
    /// [`try_new`](Self::try_new) for a fallible variant.
    pub fn new(capacity: f64) -> Self {
        Self {
            inner: RwLock::new(AgedCache::new(capacity)),
        }
    }

    /// Creates a cache that invokes `on_evict` for every departing entry.
    ///
    /// The callback runs with the write lock held; see the module docs.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not positive and finite; use
    /// [`try_with_evict`](Self::try_with_evict) for a fallible variant.
    pub fn with_evict(capacity: f64, on_evict: impl Fn(&K, &V) + Send + Sync + 'static) -> Self {
        Self {
            inner: RwLock::new(AgedCache::with_evict(capacity, on_evict)),
        }
    }

    /// Fallible variant of [`new`](Self::new).
    pub fn try_new(capacity: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: RwLock::new(AgedCache::try_new(capacity)?),
        })
    }

    /// Fallible variant of [`with_evict`](Self::with_evict).
    pub fn try_with_evict(
        capacity: f64,
        on_evict: impl Fn(&K, &V) + Send + Sync + 'static,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: RwLock::new(AgedCache::try_with_evict(capacity, on_evict)?),
        })
    }

    /// Stores `key → value`; see [`AgedCache::set`]. Takes the write lock.
    pub fn set(&self, key: K, value: V) -> bool {
        self.inner.write().set(key, value)
    }

    /// Like [`set`](Self::set), but reports an oversized entry as an error.
    pub fn try_set(&self, key: K, value: V) -> Result<bool, EntryTooLarge> {
        self.inner.write().try_set(key, value)
    }

    /// Returns a clone of the value for `key`, counting a hit.
    ///
    /// Takes the write lock: a hit reprioritizes the entry.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.write().get(key).cloned()
    }

    /// Returns a clone of the value for `key` without counting a hit.
    ///
    /// Takes the read lock.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    /// Returns `true` if `key` is resident. Takes the read lock.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Checks for `key` and stores the value only if absent, atomically.
    ///
    /// See [`AgedCache::contains_or_set`]. Takes the write lock once.
    pub fn contains_or_set(&self, key: K, value: V) -> (bool, bool) {
        self.inner.write().contains_or_set(key, value)
    }

    /// Peeks at `key` and stores the value only if absent, atomically.
    ///
    /// See [`AgedCache::peek_or_set`]. Takes the write lock once.
    pub fn peek_or_set(&self, key: K, value: V) -> (Option<V>, bool) {
        let mut cache = self.inner.write();
        let (previous, set) = cache.peek_or_set(key, value);
        (previous.cloned(), set)
    }

    /// Removes `key`; see [`AgedCache::remove`]. Takes the write lock.
    pub fn remove(&self, key: &K) -> bool {
        self.inner.write().remove(key)
    }

    /// Removes every entry and resets size and age to zero.
    pub fn purge(&self) {
        self.inner.write().purge();
    }

    /// Returns all keys from highest to lowest priority. Takes the read
    /// lock; the snapshot may be stale by the time it is used.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys()
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the sum of resident entry sizes.
    pub fn size(&self) -> f64 {
        self.inner.read().size()
    }

    /// Returns the current cache age.
    pub fn age(&self) -> f64 {
        self.inner.read().age()
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> f64 {
        self.inner.read().capacity()
    }

    /// Returns the hit count for `key`, if resident.
    pub fn hits(&self, key: &K) -> Option<u64> {
        self.inner.read().hits(key)
    }

    /// Returns a snapshot of the cache's activity counters.
    pub fn metrics(&self) -> StoreMetrics {
        self.inner.read().metrics()
    }
}

impl<K, V, P> ConcurrentCache for SyncAgedCache<K, V, P>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Weigh + Clone + Send + Sync,
    P: AgingPolicy + Send + Sync,
{
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;

    #[test]
    fn basic_operations_through_the_lock() {
        let cache: SyncLfudaCache<u64, u64> = SyncLfudaCache::new(2.0);
        assert!(!cache.set(1, 10));
        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.peek(&1), Some(10));
        assert!(cache.contains(&1));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size(), 2.0, "the two-digit value weighs two bytes");

        assert!(cache.remove(&1));
        assert!(cache.is_empty());
    }

    #[test]
    fn compound_operations_are_atomic_and_pure() {
        let cache: SyncLfudaCache<u64, u64> = SyncLfudaCache::new(2.0);
        cache.set(1, 1);
        cache.set(2, 2);

        assert_eq!(cache.contains_or_set(1, 10), (true, false));
        assert_eq!(cache.peek(&1), Some(1));

        let (previous, set) = cache.peek_or_set(2, 20);
        assert_eq!(previous, Some(2));
        assert!(!set);
        assert_eq!(cache.hits(&2), Some(1));
    }

    #[test]
    fn purge_resets_size_and_age() {
        let cache: SyncLfudaCache<u64, u64> = SyncLfudaCache::new(1.0);
        cache.set(1, 1);
        cache.get(&1);
        cache.set(2, 2);
        assert_eq!(cache.age(), 2.0);

        cache.purge();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.size(), 0.0);
        assert_eq!(cache.age(), 0.0);
    }

    #[test]
    fn callback_fires_across_threads() {
        let evictions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evictions);
        let cache: Arc<SyncLfuCache<u64, u64>> =
            Arc::new(SyncLfuCache::with_evict(8.0, move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..8u64 {
                        cache.set(t * 8 + i, 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 32 one-byte inserts through a capacity of 8: everything beyond
        // the resident set was evicted.
        assert_eq!(cache.len(), 8);
        assert_eq!(evictions.load(Ordering::SeqCst), 24);
        assert_eq!(cache.size(), 8.0);
    }

    #[test]
    fn keys_snapshot_orders_by_priority() {
        let cache: SyncGdsfCache<u64, u64> = SyncGdsfCache::new(4.0);
        cache.set(1, 1);
        cache.set(2, 2);
        cache.get(&2);

        let keys = cache.keys();
        assert_eq!(keys[0], 2);
    }
}
