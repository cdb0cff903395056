//! Snapshot Module
//!
//! Serializable form of a cache's live contents, produced by `export` and
//! consumed by `import`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;

// == Snapshot Entry ==
/// One exported entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry<V> {
    pub key: String,
    pub value: V,
    pub created_at: u64,
    pub expires_at: u64,
    pub last_access_at: u64,
    pub hit_count: u64,
    pub priority: i32,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl<V> SnapshotEntry<V> {
    /// Remaining TTL once `elapsed_ms` has passed since `exported_at`.
    ///
    /// Returns `None` when nothing is left.
    pub fn remaining_ttl_after(&self, exported_at: u64, elapsed_ms: u64) -> Option<u64> {
        let at_export = self.expires_at.saturating_sub(exported_at);
        match at_export.checked_sub(elapsed_ms) {
            Some(0) | None => None,
            Some(remaining) => Some(remaining),
        }
    }
}

// == Cache Snapshot ==
/// Exported cache state. Entries are ordered from least to most recently used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot<V> {
    /// Export time (Unix milliseconds)
    pub timestamp: u64,
    /// Statistics at export time
    pub stats: CacheStats,
    pub entries: Vec<SnapshotEntry<V>>,
}
