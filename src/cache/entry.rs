//! Cache Entry Module
//!
//! Defines individual cache entries and the options accepted by `set`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A stored value with its bookkeeping metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Approximate memory footprint in bytes
    pub size_bytes: usize,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Last read or write (Unix milliseconds)
    pub last_access_at: u64,
    /// Number of successful reads
    pub hit_count: u64,
    /// Caller-assigned weight, higher is kept longer
    pub priority: i32,
    /// Labels for grouped invalidation
    pub tags: BTreeSet<String>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped at `now` that lives for `ttl_ms`.
    pub fn new(
        value: V,
        size_bytes: usize,
        now: u64,
        ttl_ms: u64,
        priority: i32,
        tags: BTreeSet<String>,
    ) -> Self {
        Self {
            value,
            size_bytes,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
            last_access_at: now,
            hit_count: 0,
            priority,
            tags,
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now` is strictly past `expires_at`.
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    /// Remaining lifetime in milliseconds, 0 once expired.
    pub fn remaining_ttl_ms(&self, now: u64) -> u64 {
        self.expires_at.saturating_sub(now)
    }

    /// Milliseconds since creation.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }

    /// Milliseconds since the last access.
    pub fn idle_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_access_at)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    // == Record Hit ==
    pub fn record_hit(&mut self, now: u64) {
        self.hit_count += 1;
        self.last_access_at = now;
    }
}

// == Set Options ==
/// Per-entry overrides for `PerformanceCache::set`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOptions {
    /// TTL in milliseconds; the cache default applies when `None`
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    /// Eviction weight; 0 when `None`
    #[serde(default)]
    pub priority: Option<i32>,
    /// Tags attached to the entry
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl_ms = Some(ttl_ms);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
