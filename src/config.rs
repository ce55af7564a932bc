//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_LIST_TTL_SECS;

/// How a list read answers when the requested page holds no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyListPolicy {
    /// Empty page is reported as 404 "No parents found" / "No children found"
    #[default]
    NotFound,
    /// Empty page is a valid, empty collection
    EmptyOk,
}

impl FromStr for EmptyListPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_found" | "404" => Ok(Self::NotFound),
            "empty_ok" | "empty" | "200" => Ok(Self::EmptyOk),
            other => Err(format!("unknown empty list policy: {}", other)),
        }
    }
}

/// Which cache store backs the list cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => Err(format!("unknown cache backend: {}", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for cached list pages
    pub cache_ttl: u64,
    /// Maximum number of entries the in-memory cache can hold
    pub cache_max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Response policy for empty list pages
    pub empty_list_policy: EmptyListPolicy,
    /// Cache store implementation
    pub cache_backend: CacheBackend,
    /// Redis connection URL, used when `cache_backend` is Redis
    pub redis_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - List cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - In-memory cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - `EMPTY_LIST_POLICY` - `not_found` or `empty_ok` (default: not_found)
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            empty_list_policy: parse_var("EMPTY_LIST_POLICY")
                .unwrap_or(defaults.empty_list_policy),
            cache_backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: DEFAULT_LIST_TTL_SECS,
            cache_max_entries: 10_000,
            cleanup_interval: 30,
            empty_list_policy: EmptyListPolicy::NotFound,
            cache_backend: CacheBackend::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.empty_list_policy, EmptyListPolicy::NotFound);
        assert_eq!(config.cache_backend, CacheBackend::Memory);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_TTL");
        env::remove_var("EMPTY_LIST_POLICY");
        env::remove_var("CACHE_BACKEND");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.empty_list_policy, EmptyListPolicy::NotFound);
        assert_eq!(config.cache_backend, CacheBackend::Memory);
    }

    #[test]
    fn test_empty_list_policy_parse() {
        assert_eq!("not_found".parse(), Ok(EmptyListPolicy::NotFound));
        assert_eq!("EMPTY_OK".parse(), Ok(EmptyListPolicy::EmptyOk));
        assert!("sometimes".parse::<EmptyListPolicy>().is_err());
    }

    #[test]
    fn test_cache_backend_parse() {
        assert_eq!("redis".parse(), Ok(CacheBackend::Redis));
        assert_eq!(" Memory ".parse(), Ok(CacheBackend::Memory));
        assert!("memcached".parse::<CacheBackend>().is_err());
    }
}
