//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for GET /get/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for PUT /set
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /del/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for bulk removals (clear, cleanup, tag invalidation)
#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    pub removed: usize,
}

/// A key/value pair returned by GET /tags/:tag
#[derive(Debug, Clone, Serialize)]
pub struct TaggedEntry {
    pub key: String,
    pub value: Value,
}

/// Response body for GET /tags/:tag
#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub tag: String,
    pub entries: Vec<TaggedEntry>,
}

impl TagResponse {
    pub fn new(tag: impl Into<String>, entries: Vec<(String, Value)>) -> Self {
        Self {
            tag: tag.into(),
            entries: entries
                .into_iter()
                .map(|(key, value)| TaggedEntry { key, value })
                .collect(),
        }
    }
}

/// Response body for POST /import
#[derive(Debug, Clone, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub skipped: usize,
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub sets: u64,
    pub deletes: u64,
    pub expirations: u64,
    pub size: usize,
    pub hit_rate: f64,
    pub memory_usage_bytes: usize,
    pub peak_memory_usage_bytes: usize,
    pub average_entry_size: f64,
    /// `memory_usage_bytes` formatted for people
    pub memory_usage: String,
    /// `peak_memory_usage_bytes` formatted for people
    pub peak_memory_usage: String,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            average_entry_size: stats.average_entry_size(),
            memory_usage: format_bytes(stats.memory_usage_bytes),
            peak_memory_usage: format_bytes(stats.peak_memory_usage_bytes),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            sets: stats.sets,
            deletes: stats.deletes,
            expirations: stats.expirations,
            size: stats.size,
            memory_usage_bytes: stats.memory_usage_bytes,
            peak_memory_usage_bytes: stats.peak_memory_usage_bytes,
        }
    }
}

/// Formats a byte count with binary units, e.g. `1.5 KB`.
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", json!({"a": [1, 2]}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["key"], "test_key");
        assert_eq!(json["value"]["a"][1], 2);
    }

    #[test]
    fn test_set_and_delete_messages() {
        assert!(SetResponse::new("my_key").message.contains("set successfully"));
        assert!(DeleteResponse::new("gone").message.contains("deleted"));
    }

    #[test]
    fn test_stats_response_from_stats() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            size: 4,
            memory_usage_bytes: 2048,
            peak_memory_usage_bytes: 4096,
            ..CacheStats::default()
        };

        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.average_entry_size, 512.0);
        assert_eq!(resp.memory_usage, "2.00 KB");
        assert_eq!(resp.peak_memory_usage, "4.00 KB");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(50 * 1024 * 1024), "50.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_tag_response_shape() {
        let resp = TagResponse::new("users", vec![("u1".to_string(), json!("ann"))]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["tag"], "users");
        assert_eq!(json["entries"][0]["key"], "u1");
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
