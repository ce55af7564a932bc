//! LRU Tracker Module
//!
//! Access-order bookkeeping for capacity eviction in the memory cache.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order with a monotonically increasing tick.
///
/// `by_key` maps a key to its last tick; `by_tick` is the reverse index, so
/// the smallest tick is always the least recently used key.
#[derive(Debug, Default)]
pub struct LruTracker {
    tick: u64,
    by_key: HashMap<String, u64>,
    by_tick: BTreeMap<u64, String>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        self.tick += 1;
        if let Some(old) = self.by_key.insert(key.to_string(), self.tick) {
            self.by_tick.remove(&old);
        }
        self.by_tick.insert(self.tick, key.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.by_key.remove(key) {
            self.by_tick.remove(&tick);
        }
    }

    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_tick.pop_first()?;
        self.by_key.remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_in_touch_order() {
        let mut lru = LruTracker::new();
        lru.touch("parents:0:100");
        lru.touch("children:0:100");
        lru.touch("parents:100:100");

        assert_eq!(lru.evict_oldest().as_deref(), Some("parents:0:100"));
        assert_eq!(lru.evict_oldest().as_deref(), Some("children:0:100"));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_touch_refreshes_position() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("b");
        lru.touch("a");

        assert_eq!(lru.len(), 2);
        assert_eq!(lru.evict_oldest().as_deref(), Some("b"));
    }

    #[test]
    fn test_remove_and_empty() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.remove("a");
        lru.remove("missing");

        assert!(lru.is_empty());
        assert!(lru.evict_oldest().is_none());
    }
}
