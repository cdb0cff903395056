//! Perf Cache - A bounded in-memory cache server
//!
//! Serves a single `PerformanceCache` over HTTP and optionally persists its
//! snapshot across restarts.

use std::net::SocketAddr;

use anyhow::Context;
use serde_json::Value;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use perf_cache::api::{create_router, AppState};
use perf_cache::cache::CacheSnapshot;
use perf_cache::persistence::{load_snapshot, save_snapshot};
use perf_cache::{spawn_cleanup_task, Config};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the cache and import the saved snapshot, if any
/// 4. Start background TTL cleanup task
/// 5. Serve the HTTP API until SIGINT/SIGTERM
/// 6. Save the snapshot on the way out
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "perf_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Perf Cache server");

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: max_entries={}, max_memory_bytes={}, default_ttl_ms={}, port={}, cleanup_interval={}s",
        config.max_entries,
        config.max_memory_bytes,
        config.default_ttl_ms,
        config.server_port,
        config.cleanup_interval
    );

    let state = AppState::from_config(&config);

    if let Some(path) = &config.snapshot_path {
        let snapshot: Option<CacheSnapshot<Value>> = load_snapshot(path)
            .await
            .with_context(|| format!("failed to load snapshot from {}", path.display()))?;
        if let Some(snapshot) = snapshot {
            let imported = state.cache.write().await.import(snapshot);
            info!("Restored {} entries from snapshot", imported);
        }
    }

    let cleanup_handle =
        spawn_cleanup_task(state.cache.clone(), config.cache_config().cleanup_interval);
    info!("Background cleanup task started");

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    if let Some(path) = &config.snapshot_path {
        let snapshot = state.cache.read().await.export();
        save_snapshot(path, &snapshot)
            .await
            .with_context(|| format!("failed to save snapshot to {}", path.display()))?;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweeper.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
