//! Trait surface for the aged cache family.
//!
//! Every policy engine (and the builder's [`Cache`](crate::builder::Cache)
//! wrapper) exposes the same operation set; [`AgingCache`] captures it so
//! code can be written once against any policy:
//!
//! ```text
//!   ┌─────────────────────────────────────────────┐
//!   │             AgingCache<K, V>                │
//!   │                                             │
//!   │  set(&mut, K, V) → bool (evicted)           │
//!   │  get(&mut, &K) → Option<&V>                 │
//!   │  peek / contains          (no mutation)     │
//!   │  contains_or_set / peek_or_set (compound)   │
//!   │  remove / purge                             │
//!   │  keys() → Vec<K> (descending priority)      │
//!   │  len / size / age / capacity                │
//!   └─────────────────────────────────────────────┘
//!          ▲                    ▲
//!   AgedCache<K, V, P>    builder::Cache<K, V>
//! ```
//!
//! [`ConcurrentCache`] is a marker for the lock-guarded shells that are safe
//! to share across threads.
//!
//! # Example
//!
//! ```
//! use freqkit::policy::gdsf::GdsfCache;
//! use freqkit::policy::lfuda::LfudaCache;
//! use freqkit::traits::AgingCache;
//!
//! fn warm<C: AgingCache<u64, u64>>(cache: &mut C, data: &[(u64, u64)]) {
//!     for &(key, value) in data {
//!         cache.set(key, value);
//!     }
//! }
//!
//! let mut lfuda: LfudaCache<u64, u64> = LfudaCache::new(100.0);
//! let mut gdsf: GdsfCache<u64, u64> = GdsfCache::new(100.0);
//! warm(&mut lfuda, &[(1, 1), (2, 2)]);
//! warm(&mut gdsf, &[(1, 1), (2, 2)]);
//! assert_eq!(lfuda.len(), 2);
//! assert_eq!(gdsf.len(), 2);
//! ```

use std::hash::Hash;

use crate::policy::engine::{AgedCache, AgingPolicy};
use crate::store::weight::Weigh;

/// Common operations of every frequency-biased aged cache.
///
/// Semantics follow the engine:
/// [`AgedCache`](crate::policy::engine::AgedCache) documents each operation
/// in detail.
pub trait AgingCache<K, V> {
    /// Stores `key → value`, evicting as needed. Returns whether at least
    /// one eviction occurred.
    fn set(&mut self, key: K, value: V) -> bool;

    /// Returns the value for `key`, counting a hit.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns the value for `key` without mutating cache state.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is resident, without mutating cache state.
    fn contains(&self, key: &K) -> bool;

    /// Checks for `key` and stores the value only if absent. Returns
    /// `(was_present, set_result)`.
    fn contains_or_set(&mut self, key: K, value: V) -> (bool, bool);

    /// Peeks at `key` and stores the value only if absent. Returns
    /// `(previous, set_result)`.
    fn peek_or_set(&mut self, key: K, value: V) -> (Option<&V>, bool);

    /// Removes `key`. Returns whether it was present.
    fn remove(&mut self, key: &K) -> bool;

    /// Removes every entry and resets size and age to zero.
    fn purge(&mut self);

    /// Returns all keys from highest to lowest priority.
    fn keys(&self) -> Vec<K>;

    /// Returns the number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sum of resident entry sizes.
    fn size(&self) -> f64;

    /// Returns the current cache age.
    fn age(&self) -> f64;

    /// Returns the configured capacity.
    fn capacity(&self) -> f64;
}

impl<K, V, P> AgingCache<K, V> for AgedCache<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Weigh,
    P: AgingPolicy,
{
    fn set(&mut self, key: K, value: V) -> bool {
        AgedCache::set(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        AgedCache::get(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        AgedCache::peek(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        AgedCache::contains(self, key)
    }

    fn contains_or_set(&mut self, key: K, value: V) -> (bool, bool) {
        AgedCache::contains_or_set(self, key, value)
    }

    fn peek_or_set(&mut self, key: K, value: V) -> (Option<&V>, bool) {
        AgedCache::peek_or_set(self, key, value)
    }

    fn remove(&mut self, key: &K) -> bool {
        AgedCache::remove(self, key)
    }

    fn purge(&mut self) {
        AgedCache::purge(self)
    }

    fn keys(&self) -> Vec<K> {
        AgedCache::keys(self)
    }

    fn len(&self) -> usize {
        AgedCache::len(self)
    }

    fn size(&self) -> f64 {
        AgedCache::size(self)
    }

    fn age(&self) -> f64 {
        AgedCache::age(self)
    }

    fn capacity(&self) -> f64 {
        AgedCache::capacity(self)
    }
}

/// Marker trait for caches that are safe to use concurrently.
///
/// Implementors guarantee internally synchronized operations. Use as a
/// bound when an API requires a shareable cache:
///
/// ```
/// use freqkit::traits::ConcurrentCache;
///
/// fn share_between_threads<C: ConcurrentCache>(_cache: &C) {
///     // Safe to hand to other threads by reference or Arc.
/// }
/// ```
pub trait ConcurrentCache: Send + Sync {}
