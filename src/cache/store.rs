//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with access-order tracking,
//! TTL expiration and two eviction policies.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::cache::{
    capacity_score, memory_score, AccessOrder, CacheEntry, CacheSnapshot, CacheStats, Clock,
    SetOptions, SizeEstimate, SnapshotEntry, SystemClock, CAPACITY_SCAN_WINDOW,
};
use crate::config::CacheConfig;

// == Performance Cache ==
/// Bounded cache with TTL, memory accounting and priority-weighted LRU eviction.
///
/// The entry limit is a hard bound after every `set`. The memory ceiling is
/// enforced by evicting ahead of an insert, so a single value larger than the
/// ceiling is still stored.
pub struct PerformanceCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Least to most recently used keys
    order: AccessOrder,
    /// Counters and memory totals
    stats: CacheStats,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl<V> fmt::Debug for PerformanceCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerformanceCache")
            .field("len", &self.entries.len())
            .field("stats", &self.stats)
            .field("config", &self.config)
            .finish()
    }
}

impl<V: SizeEstimate> PerformanceCache<V> {
    // == Constructor ==
    /// Creates a cache reading wall-clock time.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    ///
    /// Zero entry or memory limits are raised to 1, so the cache always
    /// holds at most one entry rather than growing without bound.
    pub fn with_clock(mut config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        config.max_entries = config.max_entries.max(1);
        config.max_memory_bytes = config.max_memory_bytes.max(1);
        Self {
            entries: HashMap::new(),
            order: AccessOrder::new(),
            stats: CacheStats::new(),
            config,
            clock,
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous entry under the same key.
    ///
    /// Memory pressure and the entry limit are resolved by evicting other
    /// entries; the write itself is never rejected.
    pub fn set(&mut self, key: impl Into<String>, value: V, options: SetOptions) {
        let key = key.into();
        let now = self.clock.now_ms();
        let size_bytes = value.estimated_size();

        let projected = self.stats.memory_usage_bytes + size_bytes;
        if projected > self.config.max_memory_bytes {
            self.evict_for_memory(projected - self.config.max_memory_bytes, now);
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.max_entries {
            self.evict_for_capacity(now);
        }

        // Replace, not add: credit the old entry back first
        self.remove_entry(&key);

        let ttl_ms = options.ttl_ms.unwrap_or(self.config.default_ttl_ms);
        let entry = CacheEntry::new(
            value,
            size_bytes,
            now,
            ttl_ms,
            options.priority.unwrap_or(0),
            options.tags.into_iter().collect(),
        );
        self.entries.insert(key.clone(), entry);
        self.order.touch(&key);

        self.stats.add_memory(size_bytes);
        self.stats.set_size(self.entries.len());
        self.stats.record_set();

        trace!(key = %key, size_bytes, ttl_ms, "cache set");
    }

    // == Get ==
    /// Returns the value for `key`, or `None` if absent or expired.
    ///
    /// Expired entries are removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        self.order.touch(key);
        self.stats.record_hit();
        let entry = self.entries.get_mut(key)?;
        entry.record_hit(now);
        Some(&entry.value)
    }

    // == Delete ==
    /// Removes an entry. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.remove_entry(key).is_some() {
            self.stats.record_delete();
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Drops every entry. Cumulative counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.memory_usage_bytes = 0;
        self.stats.set_size(0);
    }

    // == Cleanup ==
    /// Removes all expired entries and returns how many were removed.
    pub fn cleanup(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
            self.stats.record_expiration();
        }

        expired_keys.len()
    }

    // == Tags ==
    /// Live entries carrying `tag`, least recently used first.
    ///
    /// Does not count as an access.
    pub fn get_by_tag(&self, tag: &str) -> Vec<(String, V)>
    where
        V: Clone,
    {
        let now = self.clock.now_ms();
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|entry| (key, entry)))
            .filter(|(_, entry)| entry.has_tag(tag) && !entry.is_expired(now))
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    /// Deletes every entry carrying `tag` and returns the count.
    pub fn invalidate_by_tag(&mut self, tag: &str) -> usize {
        let removed = self.invalidate_where(|_, entry| entry.has_tag(tag));
        debug!(tag, removed, "invalidated entries by tag");
        removed
    }

    /// Deletes every entry matching `predicate` and returns the count.
    pub fn invalidate_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&str, &CacheEntry<V>) -> bool,
    {
        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, entry)| predicate(key, entry))
            .map(|(key, _)| key.clone())
            .collect();

        keys.iter().filter(|key| self.delete(key)).count()
    }

    // == Export ==
    /// Snapshot of all live entries, least recently used first.
    pub fn export(&self) -> CacheSnapshot<V>
    where
        V: Clone,
    {
        let now = self.clock.now_ms();
        let entries = self
            .order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|entry| (key, entry)))
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, entry)| SnapshotEntry {
                key: key.clone(),
                value: entry.value.clone(),
                created_at: entry.created_at,
                expires_at: entry.expires_at,
                last_access_at: entry.last_access_at,
                hit_count: entry.hit_count,
                priority: entry.priority,
                tags: entry.tags.clone(),
            })
            .collect();

        CacheSnapshot {
            timestamp: now,
            stats: self.stats(),
            entries,
        }
    }

    // == Import ==
    /// Re-inserts a snapshot's entries, shortening each TTL by the time
    /// elapsed since export. Entries with no time left are skipped.
    ///
    /// Returns the number of entries inserted.
    pub fn import(&mut self, snapshot: CacheSnapshot<V>) -> usize {
        let elapsed = self.clock.now_ms().saturating_sub(snapshot.timestamp);
        let mut imported = 0;

        for item in snapshot.entries {
            let Some(ttl_ms) = item.remaining_ttl_after(snapshot.timestamp, elapsed) else {
                trace!(key = %item.key, "skipping expired snapshot entry");
                continue;
            };

            let options = SetOptions {
                ttl_ms: Some(ttl_ms),
                priority: Some(item.priority),
                tags: item.tags.into_iter().collect(),
            };
            self.set(item.key.clone(), item.value, options);

            if let Some(entry) = self.entries.get_mut(&item.key) {
                entry.hit_count = item.hit_count;
            }
            imported += 1;
        }

        debug!(imported, elapsed_ms = elapsed, "imported cache snapshot");
        imported
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Inspection ==
    /// Whether `key` holds a live entry. Does not count as an access.
    pub fn contains(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired(now))
            .unwrap_or(false)
    }

    /// Entry metadata, expired or not. Does not count as an access.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.stats.memory_usage_bytes
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Capacity Eviction ==
    /// Evicts the lowest-scoring entry among the least recently used window.
    fn evict_for_capacity(&mut self, now: u64) {
        let mut victim: Option<(&String, f64)> = None;
        for key in self.order.oldest(CAPACITY_SCAN_WINDOW) {
            let Some(entry) = self.entries.get(key) else {
                continue;
            };
            let score = capacity_score(entry, now);
            if victim.is_none_or(|(_, lowest)| score < lowest) {
                victim = Some((key, score));
            }
        }

        if let Some(key) = victim.map(|(key, _)| key.clone()) {
            self.remove_entry(&key);
            self.stats.record_eviction();
            debug!(key = %key, "evicted entry at capacity");
        }
    }

    // == Memory Eviction ==
    /// Evicts entries in ascending score order until `bytes_needed` are
    /// freed or nothing is left.
    fn evict_for_memory(&mut self, bytes_needed: usize, now: u64) {
        let mut candidates: Vec<(f64, String)> = self
            .order
            .iter()
            .filter_map(|key| {
                self.entries
                    .get(key)
                    .map(|entry| (memory_score(entry, now), key.clone()))
            })
            .collect();
        // Stable sort keeps ties in LRU order
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut freed = 0;
        let mut evicted = 0;
        for (_, key) in candidates {
            if freed >= bytes_needed {
                break;
            }
            if let Some(entry) = self.remove_entry(&key) {
                freed += entry.size_bytes;
                evicted += 1;
                self.stats.record_eviction();
            }
        }

        debug!(bytes_needed, freed, evicted, "memory pressure eviction");
    }

    /// Removes an entry from storage, access order and memory totals
    /// without touching the counters.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(key);
        self.stats.release_memory(entry.size_bytes);
        self.stats.set_size(self.entries.len());
        Some(entry)
    }

    /// Whether storage, access order and memory totals agree.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let summed: usize = self.entries.values().map(|e| e.size_bytes).sum();
        summed == self.stats.memory_usage_bytes
            && self.order.len() == self.entries.len()
            && self.order.iter().all(|k| self.entries.contains_key(k))
    }
}
