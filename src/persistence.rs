//! Snapshot Persistence
//!
//! Reads and writes exported cache snapshots as JSON files.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::cache::CacheSnapshot;
use crate::error::Result;

/// Loads a snapshot from `path`. A missing file yields `None`.
pub async fn load_snapshot<V: DeserializeOwned>(path: &Path) -> Result<Option<CacheSnapshot<V>>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot file");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let snapshot: CacheSnapshot<V> = serde_json::from_slice(&bytes)?;
    info!(
        path = %path.display(),
        entries = snapshot.entries.len(),
        "loaded cache snapshot"
    );
    Ok(Some(snapshot))
}

/// Writes a snapshot to a sibling temporary file, then renames it over `path`.
pub async fn save_snapshot<V: Serialize>(path: &Path, snapshot: &CacheSnapshot<V>) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    let tmp = tmp_path(path);

    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;

    info!(
        path = %path.display(),
        entries = snapshot.entries.len(),
        "saved cache snapshot"
    );
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
