//! GDSF: greedy-dual-size-frequency.
//!
//! Priority is `age + hits / size`, so a large value needs proportionally
//! more hits to earn the rank a small value gets from one. That bias keeps
//! many small popular entries over a few large ones, which maximizes object
//! hit rate when values vary widely in size (the classic web-proxy
//! workload).
//!
//! ```text
//!   insert:  p = age + 1/size     (hits start at 1)
//!   hit:     p = age + hits/size  (age read at hit time)
//!   evict:   age = victim's p
//! ```
//!
//! Sizes come from the value's [`Weigh`](crate::store::weight::Weigh) weight
//! clamped to ≥ 1. Replacing a value with a larger one lowers the entry's
//! priority; that is the intended reading of "size just went up, the entry
//! must re-earn its keep".

use crate::policy::engine::{AgedCache, AgingPolicy};

/// The GDSF policy descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gdsf;

impl AgingPolicy for Gdsf {
    const NAME: &'static str = "gdsf";

    fn priority(age: f64, hits: u64, size: f64) -> f64 {
        age + hits as f64 / size
    }
}

/// Cache evicting by frequency-per-byte with dynamic aging.
///
/// Construct with [`AgedCache::new`] or [`AgedCache::with_evict`].
///
/// # Example
///
/// ```
/// use freqkit::policy::gdsf::GdsfCache;
///
/// let mut cache: GdsfCache<&str, String> = GdsfCache::new(6.0);
/// cache.set("large", "xxxx".to_string()); // 4 bytes, priority 1/4
/// cache.set("a", "x".to_string());        // 1 byte,  priority 1
/// cache.set("b", "y".to_string());        // 1 byte,  priority 1
///
/// // The large low-density entry is the first victim.
/// cache.set("c", "z".to_string());
/// assert!(!cache.contains(&"large"));
/// assert!(cache.contains(&"a"));
/// ```
pub type GdsfCache<K, V> = AgedCache<K, V, Gdsf>;
