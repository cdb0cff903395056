//! Eviction Scoring Module
//!
//! Lower scores are evicted first.

use crate::cache::CacheEntry;

/// Number of least-recently-used keys considered by capacity eviction
pub const CAPACITY_SCAN_WINDOW: usize = 10;

// == Capacity Score ==
/// Score used when the entry limit is reached.
///
/// `hit_count * priority * 1000 / (idle_ms + 1)`
pub fn capacity_score<V>(entry: &CacheEntry<V>, now: u64) -> f64 {
    let weight = entry.hit_count as f64 * f64::from(entry.priority) * 1000.0;
    weight / (entry.idle_ms(now) as f64 + 1.0)
}

// == Memory Score ==
/// Score used when an insert would exceed the memory ceiling.
///
/// `hit_count * priority * remaining_ttl / (age * idle * size + 1)`
pub fn memory_score<V>(entry: &CacheEntry<V>, now: u64) -> f64 {
    let weight =
        entry.hit_count as f64 * f64::from(entry.priority) * entry.remaining_ttl_ms(now) as f64;
    let staleness =
        entry.age_ms(now) as f64 * entry.idle_ms(now) as f64 * entry.size_bytes as f64;
    weight / (staleness + 1.0)
}
