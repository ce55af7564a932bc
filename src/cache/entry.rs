//! Cache Entry Module
//!
//! A single stored value with its expiration deadline.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Stored bytes plus the Unix millisecond at which they stop being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Vec<u8>,
    pub expires_at: u64,
}

impl CacheEntry {
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: Vec<u8>, ttl: Duration) -> Self {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        Self {
            value,
            expires_at: current_timestamp_ms().saturating_add(ttl_ms),
        }
    }

    /// Expired once the clock reaches the deadline.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_fresh_entry_is_live() {
        let entry = CacheEntry::new(b"[]".to_vec(), Duration::from_secs(60));

        assert_eq!(entry.value, b"[]");
        assert!(entry.expires_at > current_timestamp_ms());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let entry = CacheEntry::new(b"[]".to_vec(), Duration::from_millis(50));
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expired_at_deadline() {
        let entry = CacheEntry {
            value: Vec::new(),
            expires_at: current_timestamp_ms(),
        };

        assert!(entry.is_expired());
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new(Vec::new(), Duration::MAX);
        assert_eq!(entry.expires_at, u64::MAX);
    }
}
