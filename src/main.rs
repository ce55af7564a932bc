//! Family Records - parent/child record service
//!
//! Serves CRUD endpoints for parents and children with cached list reads.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::{signal, sync::RwLock, task::JoinHandle};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use family_records::cache::{CacheStore, MemoryCache};
use family_records::config::CacheBackend;
use family_records::store::InMemoryRepository;
use family_records::{create_router, spawn_cleanup_task, AppState, Config};

/// Startup sequence:
/// 1. Initialize tracing
/// 2. Load configuration from environment variables
/// 3. Select the cache backend, starting the sweep task for the in-memory one
/// 4. Serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "family_records=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Family Records service");

    let config = Config::from_env();
    info!(
        port = config.server_port,
        cache_ttl = config.cache_ttl,
        cache_max_entries = config.cache_max_entries,
        cleanup_interval = config.cleanup_interval,
        empty_list_policy = ?config.empty_list_policy,
        cache_backend = ?config.cache_backend,
        "Configuration loaded"
    );

    let (cache, cleanup_handle) = build_cache(&config).await?;

    let state = AppState::from_parts(Arc::new(InMemoryRepository::new()), cache, &config);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn memory_cache(config: &Config) -> (Arc<dyn CacheStore>, Option<JoinHandle<()>>) {
    let cache = Arc::new(RwLock::new(MemoryCache::new(config.cache_max_entries)));
    let handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);
    info!("In-memory cache initialized, sweep task started");
    (cache, Some(handle))
}

async fn build_cache(
    config: &Config,
) -> anyhow::Result<(Arc<dyn CacheStore>, Option<JoinHandle<()>>)> {
    match config.cache_backend {
        CacheBackend::Memory => Ok(memory_cache(config)),
        #[cfg(feature = "redis")]
        CacheBackend::Redis => {
            let cache = family_records::cache::RedisCache::connect(&config.redis_url)
                .await
                .with_context(|| format!("failed to connect to {}", config.redis_url))?;
            info!(url = %config.redis_url, "Redis cache initialized");
            Ok((Arc::new(cache), None))
        }
        #[cfg(not(feature = "redis"))]
        CacheBackend::Redis => {
            warn!("Built without the redis feature, falling back to the in-memory cache");
            Ok(memory_cache(config))
        }
    }
}

/// Waits for Ctrl+C or SIGTERM, then stops the sweep task.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
