//! Invalidation Coordinator
//!
//! Maps each mutation to the list kinds whose cached pages it makes stale and
//! drops every window of those kinds. Parent pages embed their children, so
//! any child mutation also drops the parent pages.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::entry::current_timestamp_ms;
use crate::cache::keys::{kind_prefix, EntityKind};
use crate::cache::stats::CacheCounters;
use crate::cache::CacheStore;

/// A successful write against the persistence store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateParent,
    UpdateParent,
    /// Cascades to the parent's children.
    DeleteParent,
    CreateChild,
    UpdateChild,
    DeleteChild,
}

impl Mutation {
    /// List kinds whose cached pages this mutation invalidates.
    pub fn invalidates(self) -> &'static [EntityKind] {
        use EntityKind::{Children, Parents};
        match self {
            Mutation::CreateParent | Mutation::UpdateParent => &[Parents],
            Mutation::DeleteParent => &[Parents, Children],
            Mutation::CreateChild | Mutation::UpdateChild | Mutation::DeleteChild => {
                &[Children, Parents]
            }
        }
    }
}

/// Per-kind generation counters.
///
/// Bumped before every invalidation. Cached pages carry the generation they
/// were read under, so a page written back after a concurrent invalidation
/// can never be served. Seeded from the clock so a restarted process does not
/// reuse generations still stamped on entries in a shared store.
#[derive(Debug)]
pub(crate) struct Generations {
    slots: [AtomicU64; 2],
}

impl Generations {
    pub fn new() -> Self {
        let seed = current_timestamp_ms();
        Self {
            slots: [AtomicU64::new(seed), AtomicU64::new(seed)],
        }
    }

    pub fn current(&self, kind: EntityKind) -> u64 {
        self.slots[kind.index()].load(Ordering::Acquire)
    }

    pub fn bump(&self, kind: EntityKind) -> u64 {
        self.slots[kind.index()].fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Drops cached list pages after mutations.
///
/// Obtained from [`ListCache::invalidator`](crate::cache::ListCache::invalidator)
/// so it shares the cache store, generations and counters of the read path.
/// Every failure is logged and absorbed: a mutation that reached the store
/// is never reported as failed because the cache was unreachable.
#[derive(Clone)]
pub struct Invalidator {
    store: Arc<dyn CacheStore>,
    generations: Arc<Generations>,
    counters: Arc<CacheCounters>,
}

impl Invalidator {
    pub(crate) fn new(
        store: Arc<dyn CacheStore>,
        generations: Arc<Generations>,
        counters: Arc<CacheCounters>,
    ) -> Self {
        Self {
            store,
            generations,
            counters,
        }
    }

    /// Drops every cached window of `kind`. Returns the number of keys removed.
    pub async fn invalidate(&self, kind: EntityKind) -> usize {
        let generation = self.generations.bump(kind);
        self.counters.record_invalidation();

        let prefix = kind_prefix(kind);
        match self.store.delete_matching(&prefix).await {
            Ok(removed) => {
                debug!(%kind, removed, generation, "Invalidated list cache");
                removed
            }
            Err(err) => {
                self.counters.record_cache_error();
                warn!(%prefix, error = %err, "Failed to invalidate list cache");
                0
            }
        }
    }

    /// Applies the invalidation fan-out of one mutation.
    pub async fn invalidate_for(&self, mutation: Mutation) -> usize {
        let mut removed = 0;
        for kind in mutation.invalidates() {
            removed += self.invalidate(*kind).await;
        }
        removed
    }
}
