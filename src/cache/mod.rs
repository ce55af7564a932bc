//! Cache Module
//!
//! Read-through caching of list pages with mutation-driven invalidation.
//!
//! - [`keys`]: `<kind>:<skip>:<limit>` key scheme
//! - [`ListCache`]: read path, populated lazily on miss
//! - [`Invalidator`]: write path, drops all windows of the affected kinds
//! - [`CacheStore`]: injected backend ([`MemoryCache`], or Redis with the
//!   `redis` feature)

mod entry;
mod invalidation;
pub mod keys;
mod lru;
mod manager;
mod memory;
#[cfg(feature = "redis")]
mod redis_store;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use invalidation::{Invalidator, Mutation};
pub use keys::{kind_prefix, list_key, EntityKind};
pub use lru::LruTracker;
pub use manager::ListCache;
pub use memory::MemoryCache;
#[cfg(feature = "redis")]
pub use redis_store::RedisCache;
pub use stats::ListCacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 8 * 1024 * 1024; // 8 MB

/// TTL applied to cached list pages unless configured otherwise
pub const DEFAULT_LIST_TTL_SECS: u64 = 300;
