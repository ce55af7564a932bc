//! Cache key scheme for list pages.
//!
//! Every list key is `<kind>:<skip>:<limit>`, so all windows of one kind share
//! the `<kind>:` prefix and can be dropped with a single prefix delete.

use std::fmt;

use crate::models::PageWindow;

/// Entity collections that have cached list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Parents,
    Children,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Parents, EntityKind::Children];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Parents => "parents",
            EntityKind::Children => "children",
        }
    }

    /// Stable slot used by per-kind counters.
    pub(crate) fn index(self) -> usize {
        match self {
            EntityKind::Parents => 0,
            EntityKind::Children => 1,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the cache key for one list window of a kind.
pub fn list_key(kind: EntityKind, window: PageWindow) -> String {
    format!("{}:{}:{}", kind, window.skip, window.limit)
}

/// Returns the prefix shared by every list key of a kind.
pub fn kind_prefix(kind: EntityKind) -> String {
    format!("{}:", kind)
}
