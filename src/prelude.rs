pub use crate::builder::{Cache, CacheBuilder, EvictionPolicy};
pub use crate::ds::IndexedMinHeap;
pub use crate::policy::{AgedCache, AgingPolicy, GdsfCache, LfuCache, LfudaCache};
pub use crate::store::weight::Weigh;
pub use crate::traits::AgingCache;

#[cfg(feature = "concurrency")]
pub use crate::policy::sync::{SyncGdsfCache, SyncLfuCache, SyncLfudaCache};
