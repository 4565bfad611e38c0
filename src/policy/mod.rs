pub mod engine;
pub mod gdsf;
pub mod lfu;
pub mod lfuda;

#[cfg(feature = "concurrency")]
pub mod sync;

pub use engine::{AgedCache, AgingPolicy, EntryTooLarge, EvictCallback};
pub use gdsf::{Gdsf, GdsfCache};
pub use lfu::{Lfu, LfuCache};
pub use lfuda::{Lfuda, LfudaCache};

#[cfg(feature = "concurrency")]
pub use sync::{SyncAgedCache, SyncGdsfCache, SyncLfuCache, SyncLfudaCache};
