//! Cache Store Abstraction
//!
//! The capability the list cache and the invalidator are built on. Backends
//! are injected as `Arc<dyn CacheStore>`.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheResult;

/// Key-value store with TTL and prefix deletion.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored bytes, or `None` when absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Stores bytes under a key, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()>;

    /// Deletes every key starting with `prefix`, returning how many were removed.
    async fn delete_matching(&self, prefix: &str) -> CacheResult<usize>;
}
