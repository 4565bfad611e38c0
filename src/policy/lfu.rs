//! Plain LFU: least frequently used.
//!
//! Priority is the raw hit count. The cache age advances on every eviction
//! like the other policies (it is reported by `age()`), but LFU never folds
//! it into a priority, so an entry that accumulated hits keeps its rank
//! until it is explicitly displaced by busier entries.
//!
//! ```text
//!   insert:  p = 1
//!   hit:     p = hits
//! ```
//!
//! Capacity is a byte budget over value weights (see
//! [`Weigh`](crate::store::weight::Weigh)); store values that weigh 1 to get
//! entry-count semantics.

use crate::policy::engine::{AgedCache, AgingPolicy};

/// The LFU policy descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lfu;

impl AgingPolicy for Lfu {
    const NAME: &'static str = "lfu";

    fn priority(_age: f64, hits: u64, _size: f64) -> f64 {
        hits as f64
    }
}

/// Cache evicting by least frequency, without aging.
///
/// Construct with [`AgedCache::new`] or [`AgedCache::with_evict`].
///
/// # Example
///
/// ```
/// use freqkit::policy::lfu::LfuCache;
///
/// let mut cache: LfuCache<&str, u64> = LfuCache::new(2.0);
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.get(&"a");
///
/// // "b" has the lower hit count and is evicted.
/// cache.set("c", 3);
/// assert!(cache.contains(&"a"));
/// assert!(!cache.contains(&"b"));
/// ```
pub type LfuCache<K, V> = AgedCache<K, V, Lfu>;
