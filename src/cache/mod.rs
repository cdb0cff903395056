//! Cache Module
//!
//! Provides a bounded in-memory cache with TTL expiration, priority-weighted
//! LRU eviction and memory-pressure eviction.

mod clock;
mod entry;
mod eviction;
mod lru;
mod size;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, SetOptions};
pub use eviction::{capacity_score, memory_score, CAPACITY_SCAN_WINDOW};
pub use lru::AccessOrder;
pub use size::{ByteBuf, SizeEstimate, BOOL_SIZE, NULL_SIZE, NUMBER_SIZE};
pub use snapshot::{CacheSnapshot, SnapshotEntry};
pub use stats::CacheStats;
pub use store::PerformanceCache;
