//! Unified cache builder for the three eviction policies.
//!
//! Selects a policy by name at construction and hides the per-policy engine
//! types behind one wrapper, the way a configuration layer usually wants to
//! consume this crate.
//!
//! ## Example
//!
//! ```
//! use freqkit::builder::{Cache, CacheBuilder, EvictionPolicy};
//! use freqkit::traits::AgingCache;
//!
//! let mut cache: Cache<u64, String> = CacheBuilder::new(100.0).build(EvictionPolicy::Lfuda);
//! cache.set(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::engine::{AgedCache, EvictCallback, validate_capacity};
use crate::policy::gdsf::GdsfCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lfuda::LfudaCache;
use crate::store::weight::Weigh;
use crate::traits::AgingCache;

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Least frequently used.
    Lfu,
    /// Least frequently used with dynamic aging.
    Lfuda,
    /// Greedy-dual-size-frequency (size-aware, dynamically aged).
    Gdsf,
}

/// Policy-erased cache produced by [`CacheBuilder`].
///
/// Implements [`AgingCache`], so every operation is available through the
/// trait regardless of which policy was selected.
#[derive(Debug)]
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V> {
    Lfu(LfuCache<K, V>),
    Lfuda(LfudaCache<K, V>),
    Gdsf(GdsfCache<K, V>),
}

/// Builder selecting capacity, policy, and an optional eviction listener.
pub struct CacheBuilder<K, V> {
    capacity: f64,
    on_evict: Option<EvictCallback<K, V>>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Eq + Hash + Clone,
    V: Weigh,
{
    /// Creates a builder for a cache with the given byte capacity.
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            on_evict: None,
        }
    }

    /// Installs a callback invoked with the key and value of every entry
    /// that leaves the cache.
    ///
    /// The callback must not call back into the cache; see
    /// [`EvictCallback`].
    pub fn eviction_listener(mut self, listener: impl Fn(&K, &V) + Send + Sync + 'static) -> Self {
        self.on_evict = Some(Box::new(listener));
        self
    }

    /// Builds a cache with the selected policy.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is not positive and finite; use
    /// [`try_build`](Self::try_build) for a fallible variant.
    pub fn build(self, policy: EvictionPolicy) -> Cache<K, V> {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible variant of [`build`](Self::build).
    pub fn try_build(self, policy: EvictionPolicy) -> Result<Cache<K, V>, ConfigError> {
        let capacity = validate_capacity(self.capacity)?;
        let inner = match policy {
            EvictionPolicy::Lfu => CacheInner::Lfu(AgedCache::build(capacity, self.on_evict)),
            EvictionPolicy::Lfuda => CacheInner::Lfuda(AgedCache::build(capacity, self.on_evict)),
            EvictionPolicy::Gdsf => CacheInner::Gdsf(AgedCache::build(capacity, self.on_evict)),
        };
        Ok(Cache { inner })
    }
}

macro_rules! dispatch {
    ($self:ident, $cache:ident => $body:expr) => {
        match &$self.inner {
            CacheInner::Lfu($cache) => $body,
            CacheInner::Lfuda($cache) => $body,
            CacheInner::Gdsf($cache) => $body,
        }
    };
    (mut $self:ident, $cache:ident => $body:expr) => {
        match &mut $self.inner {
            CacheInner::Lfu($cache) => $body,
            CacheInner::Lfuda($cache) => $body,
            CacheInner::Gdsf($cache) => $body,
        }
    };
}

impl<K, V> AgingCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Weigh,
{
    fn set(&mut self, key: K, value: V) -> bool {
        dispatch!(mut self, cache => cache.set(key, value))
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        dispatch!(mut self, cache => cache.get(key))
    }

    fn peek(&self, key: &K) -> Option<&V> {
        dispatch!(self, cache => cache.peek(key))
    }

    fn contains(&self, key: &K) -> bool {
        dispatch!(self, cache => cache.contains(key))
    }

    fn contains_or_set(&mut self, key: K, value: V) -> (bool, bool) {
        dispatch!(mut self, cache => cache.contains_or_set(key, value))
    }

    fn peek_or_set(&mut self, key: K, value: V) -> (Option<&V>, bool) {
        dispatch!(mut self, cache => cache.peek_or_set(key, value))
    }

    fn remove(&mut self, key: &K) -> bool {
        dispatch!(mut self, cache => cache.remove(key))
    }

    fn purge(&mut self) {
        dispatch!(mut self, cache => cache.purge())
    }

    fn keys(&self) -> Vec<K> {
        dispatch!(self, cache => cache.keys())
    }

    fn len(&self) -> usize {
        dispatch!(self, cache => cache.len())
    }

    fn size(&self) -> f64 {
        dispatch!(self, cache => cache.size())
    }

    fn age(&self) -> f64 {
        dispatch!(self, cache => cache.age())
    }

    fn capacity(&self) -> f64 {
        dispatch!(self, cache => cache.capacity())
    }
}
