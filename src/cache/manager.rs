//! Read-Through List Cache
//!
//! Serves list pages from the cache store when a current entry exists and
//! falls back to the persistence store otherwise, writing the live page back
//! with the configured TTL.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::cache::invalidation::{Generations, Invalidator};
use crate::cache::keys::{list_key, EntityKind};
use crate::cache::stats::{CacheCounters, ListCacheStats};
use crate::cache::CacheStore;
use crate::config::EmptyListPolicy;
use crate::error::{StoreError, StoreResult};
use crate::models::PageWindow;

/// Stored shape of a cached page. `items` uses the same serde
/// representation as a direct response.
#[derive(Serialize)]
struct CachedPageRef<'a, T> {
    generation: u64,
    items: &'a [T],
}

#[derive(Deserialize)]
struct CachedPage<T> {
    generation: u64,
    items: Vec<T>,
}

/// Read-through cache for list endpoints.
pub struct ListCache {
    store: Arc<dyn CacheStore>,
    generations: Arc<Generations>,
    counters: Arc<CacheCounters>,
    ttl: Duration,
    empty_list_policy: EmptyListPolicy,
}

impl ListCache {
    /// Creates a list cache over an injected store.
    ///
    /// Empty pages default to [`EmptyListPolicy::NotFound`].
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            store,
            generations: Arc::new(Generations::new()),
            counters: Arc::new(CacheCounters::default()),
            ttl,
            empty_list_policy: EmptyListPolicy::default(),
        }
    }

    pub fn with_empty_list_policy(mut self, policy: EmptyListPolicy) -> Self {
        self.empty_list_policy = policy;
        self
    }

    /// Returns an invalidator sharing this cache's store and generations.
    pub fn invalidator(&self) -> Invalidator {
        Invalidator::new(
            self.store.clone(),
            self.generations.clone(),
            self.counters.clone(),
        )
    }

    pub fn stats(&self) -> ListCacheStats {
        self.counters.snapshot()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns one page of `kind`, from cache when possible.
    ///
    /// `fetch` is the persistence query for the window and is only called on
    /// a miss. Its errors propagate untouched and nothing is cached for them.
    /// An empty page under the `NotFound` policy is reported as
    /// `StoreError::NotFound` and likewise not cached.
    pub async fn get_list<T, F, Fut>(
        &self,
        kind: EntityKind,
        window: PageWindow,
        fetch: F,
    ) -> StoreResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(PageWindow) -> Fut,
        Fut: Future<Output = StoreResult<Vec<T>>>,
    {
        let key = list_key(kind, window);
        let generation = self.generations.current(kind);

        if let Some(items) = self.lookup(&key, generation).await {
            self.counters.record_hit();
            trace!(%key, count = items.len(), "List cache hit");
            return Ok(items);
        }

        self.counters.record_miss();
        trace!(%key, "List cache miss");
        let items = fetch(window).await?;

        if items.is_empty() && self.empty_list_policy == EmptyListPolicy::NotFound {
            return Err(StoreError::NotFound(format!("No {} found", kind)));
        }

        self.write_back(kind, &key, generation, &items).await;
        Ok(items)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str, generation: u64) -> Option<Vec<T>> {
        let bytes = match self.store.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                self.counters.record_cache_error();
                warn!(%key, error = %err, "Cache read failed, falling back to store");
                return None;
            }
        };

        match serde_json::from_slice::<CachedPage<T>>(&bytes) {
            Ok(page) if page.generation == generation => Some(page.items),
            Ok(page) => {
                debug!(
                    %key,
                    cached = page.generation,
                    current = generation,
                    "Discarding list page from an older generation"
                );
                None
            }
            Err(err) => {
                self.counters.record_cache_error();
                warn!(%key, error = %err, "Cached list page could not be decoded");
                None
            }
        }
    }

    async fn write_back<T: Serialize>(
        &self,
        kind: EntityKind,
        key: &str,
        generation: u64,
        items: &[T],
    ) {
        if self.generations.current(kind) != generation {
            debug!(%key, "Skipping write-back, list was invalidated during the query");
            return;
        }

        let bytes = match serde_json::to_vec(&CachedPageRef { generation, items }) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.counters.record_cache_error();
                warn!(%key, error = %err, "List page could not be encoded for caching");
                return;
            }
        };

        match self.store.set(key, &bytes, self.ttl).await {
            Ok(()) => self.counters.record_write_back(),
            Err(err) => {
                self.counters.record_cache_error();
                warn!(%key, error = %err, "Failed to cache list page");
            }
        }
    }
}
