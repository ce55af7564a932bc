//! TTL Sweep Task
//!
//! Expired list pages are already ignored on read; this sweep reclaims the
//! memory of pages that are never read again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a task that drops expired entries from the memory cache every
/// `interval_secs` seconds (minimum 1). Abort the handle on shutdown.
pub fn spawn_cleanup_task(cache: Arc<RwLock<MemoryCache>>, interval_secs: u64) -> JoinHandle<()> {
    let period = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(interval_secs = period.as_secs(), "Starting list cache TTL sweep");

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let (removed, remaining, evictions) = {
                let mut guard = cache.write().await;
                let removed = guard.cleanup_expired();
                (removed, guard.len(), guard.evictions())
            };

            if removed > 0 {
                info!(removed, remaining, evictions, "TTL sweep dropped expired list pages");
            } else {
                debug!(remaining, "TTL sweep found nothing to drop");
            }
        }
    })
}
