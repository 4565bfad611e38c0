pub mod entry;
pub mod weight;

pub use entry::{CacheEntry, EntryId, EntryStore, StoreMetrics};
pub use weight::Weigh;
