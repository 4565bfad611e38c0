//! LFUDA: least frequently used with dynamic aging.
//!
//! Priority is `hits + age`. The age term is the priority of the most
//! recently evicted entry, so every new admission starts at the current
//! floor instead of at the bottom: an entry that was popular long ago decays
//! relative to fresh traffic without any per-entry timestamps or periodic
//! rescans.
//!
//! ```text
//!   insert:  p = age + 1          (hits start at 1)
//!   hit:     p = hits + age       (age read at hit time)
//!   evict:   age = victim's p
//! ```
//!
//! Capacity is a byte budget over value weights (see
//! [`Weigh`](crate::store::weight::Weigh)); store values that weigh 1 to get
//! entry-count semantics.

use crate::policy::engine::{AgedCache, AgingPolicy};

/// The LFUDA policy descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lfuda;

impl AgingPolicy for Lfuda {
    const NAME: &'static str = "lfuda";

    fn priority(age: f64, hits: u64, _size: f64) -> f64 {
        hits as f64 + age
    }
}

/// Cache evicting by least frequency with dynamic aging.
///
/// Construct with [`AgedCache::new`] or [`AgedCache::with_evict`].
///
/// # Example
///
/// ```
/// use freqkit::policy::lfuda::LfudaCache;
///
/// let mut cache: LfudaCache<u64, u64> = LfudaCache::new(1.0);
/// cache.set(1, 1);
/// cache.get(&1);
///
/// // Evicting key 1 (priority 2) raises the age floor to 2.
/// assert!(cache.set(2, 2));
/// assert_eq!(cache.age(), 2.0);
/// ```
pub type LfudaCache<K, V> = AgedCache<K, V, Lfuda>;
