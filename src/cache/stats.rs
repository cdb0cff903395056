//! Cache Statistics Module
//!
//! Tracks cache counters and memory usage.

use serde::{Deserialize, Serialize};

// == Cache Stats ==
/// Cumulative counters plus current size and memory figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Successful lookups
    pub hits: u64,
    /// Lookups for absent or expired keys
    pub misses: u64,
    /// Entries removed by capacity or memory-pressure eviction
    pub evictions: u64,
    /// Completed `set` calls
    pub sets: u64,
    /// Entries removed by `delete` or tag invalidation
    pub deletes: u64,
    /// Entries removed because their TTL elapsed
    pub expirations: u64,
    /// Current number of stored entries
    pub size: usize,
    /// Sum of stored entry sizes
    pub memory_usage_bytes: usize,
    /// Highest `memory_usage_bytes` seen
    pub peak_memory_usage_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Average Entry Size ==
    /// Returns memory usage / size, or 0.0 when empty.
    pub fn average_entry_size(&self) -> f64 {
        if self.size == 0 {
            0.0
        } else {
            self.memory_usage_bytes as f64 / self.size as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Memory Accounting ==
    pub fn add_memory(&mut self, bytes: usize) {
        self.memory_usage_bytes += bytes;
        self.peak_memory_usage_bytes = self.peak_memory_usage_bytes.max(self.memory_usage_bytes);
    }

    pub fn release_memory(&mut self, bytes: usize) {
        self.memory_usage_bytes = self.memory_usage_bytes.saturating_sub(bytes);
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}
