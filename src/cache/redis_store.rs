//! Redis cache store.
//!
//! Prefix deletion without SCAN: every key written is also added to a
//! tracking set named after its prefix (`parents:` -> `parents:_keys`), and
//! `delete_matching` deletes the members of that set.
//!
//! The commands are not atomic. A crash between SET and SADD leaves an
//! untracked entry that still expires by TTL; a crash between DEL and SREM
//! leaves members that are deleted again next time. Only the members read by
//! `delete_matching` are removed from the set, so a key tracked concurrently
//! stays tracked for the next invalidation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::cache::CacheStore;
use crate::error::{CacheError, CacheResult};

/// Redis backend using a connection manager for reconnects.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis (e.g. `redis://localhost:6379`).
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

impl RedisCache {
    /// Deletes the keys in `tracked` under `prefix`, then drops exactly those
    /// members from the tracking set.
    async fn delete_tracked(
        &self,
        tracking: &str,
        prefix: &str,
        tracked: &[String],
    ) -> CacheResult<usize> {
        if tracked.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn.clone();
        let doomed: Vec<&String> = tracked.iter().filter(|k| k.starts_with(prefix)).collect();

        let removed = if doomed.is_empty() {
            0
        } else {
            conn.del::<_, usize>(&doomed).await.map_err(map_redis_error)?
        };

        conn.srem::<_, _, ()>(tracking, tracked.to_vec())
            .await
            .map_err(map_redis_error)?;
        Ok(removed)
    }
}

/// Tracking set for the prefix of `key`, up to and including the first `:`.
fn tracking_key_for(key: &str) -> Option<String> {
    key.find(':').map(|idx| tracking_key(&key[..=idx]))
}

fn tracking_key(prefix: &str) -> String {
    format!("{}_keys", prefix)
}

fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        CacheError::Unavailable(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(map_redis_error)?;

        if let Some(tracking) = tracking_key_for(key) {
            conn.sadd::<_, _, ()>(&tracking, key)
                .await
                .map_err(map_redis_error)?;
            // Members outlive their keys at most by one TTL.
            conn.expire::<_, ()>(&tracking, seconds as i64)
                .await
                .map_err(map_redis_error)?;
        }

        Ok(())
    }

    async fn delete_matching(&self, prefix: &str) -> CacheResult<usize> {
        let mut conn = self.conn.clone();
        let tracking = tracking_key(prefix);

        let tracked: Vec<String> = conn.smembers(&tracking).await.map_err(map_redis_error)?;
        self.delete_tracked(&tracking, prefix, &tracked).await
    }
}
