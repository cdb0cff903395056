//! Perf Cache - A bounded in-memory cache
//!
//! Provides TTL expiration, priority-weighted LRU eviction, memory-aware
//! eviction, tag invalidation and snapshot export/import, plus an element
//! cache that invalidates itself when a document tree changes.

pub mod api;
pub mod cache;
pub mod config;
pub mod dom;
pub mod error;
pub mod models;
pub mod persistence;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheSnapshot, CacheStats, PerformanceCache, SetOptions};
pub use config::{CacheConfig, Config};
pub use dom::{Document, ElementCache};
pub use tasks::spawn_cleanup_task;
