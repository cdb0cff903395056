//! Configuration Module
//!
//! Cache limits and server settings, loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default maximum number of entries
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default memory ceiling (50 MiB)
pub const DEFAULT_MAX_MEMORY_BYTES: usize = 50 * 1024 * 1024;

/// Default TTL (one hour)
pub const DEFAULT_TTL_MS: u64 = 3_600_000;

/// Default interval between expiry sweeps
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

// == Cache Config ==
/// Limits applied to a `PerformanceCache` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Soft ceiling on the summed entry sizes
    pub max_memory_bytes: usize,
    /// TTL applied when `set` is called without one
    pub default_ttl_ms: u64,
    /// Interval between background expiry sweeps
    pub cleanup_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_memory_bytes: DEFAULT_MAX_MEMORY_BYTES,
            default_ttl_ms: DEFAULT_TTL_MS,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
        }
    }
}

impl CacheConfig {
    pub fn new(max_entries: usize, max_memory_bytes: usize, default_ttl_ms: u64) -> Self {
        Self {
            max_entries,
            max_memory_bytes,
            default_ttl_ms,
            ..Self::default()
        }
    }

    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    // == Validate ==
    /// Rejects limits the cache cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entries must be at least 1".to_string(),
            ));
        }
        if self.max_memory_bytes == 0 {
            return Err(CacheError::InvalidConfig(
                "max_memory_bytes must be at least 1".to_string(),
            ));
        }
        if self.cleanup_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cleanup interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

// == Server Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_entries: usize,
    pub max_memory_bytes: usize,
    pub default_ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Where the cache snapshot is loaded from and saved to, if anywhere
    pub snapshot_path: Option<PathBuf>,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `MAX_MEMORY_BYTES` - Memory ceiling in bytes (default: 50 MiB)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 3600000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    /// - `SNAPSHOT_PATH` - Snapshot file, persistence disabled when unset
    pub fn from_env() -> Self {
        Self {
            max_entries: env_or("MAX_ENTRIES", DEFAULT_MAX_ENTRIES),
            max_memory_bytes: env_or("MAX_MEMORY_BYTES", DEFAULT_MAX_MEMORY_BYTES),
            default_ttl_ms: env_or("DEFAULT_TTL_MS", DEFAULT_TTL_MS),
            server_port: env_or("SERVER_PORT", 3000),
            cleanup_interval: env_or("CLEANUP_INTERVAL_SECS", DEFAULT_CLEANUP_INTERVAL_SECS),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Cache limits derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(self.max_entries, self.max_memory_bytes, self.default_ttl_ms)
            .with_cleanup_interval(Duration::from_secs(self.cleanup_interval))
    }

    pub fn validate(&self) -> Result<()> {
        self.cache_config().validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_memory_bytes: DEFAULT_MAX_MEMORY_BYTES,
            default_ttl_ms: DEFAULT_TTL_MS,
            server_port: 3000,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL_SECS,
            snapshot_path: None,
        }
    }
}
