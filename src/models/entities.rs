//! Domain records and store commands
//!
//! `Parent` and `Child` are both the persisted view and the wire shape; list
//! pages are cached in exactly this serde representation.

use serde::{Deserialize, Serialize};

/// A child record. Never embeds parent data, only the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub name: String,
    pub age: u8,
    pub hobby: String,
    pub parent_id: i64,
}

/// A parent record with its children embedded, ordered by child id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub id: i64,
    pub name: String,
    pub age: u8,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub children: Vec<Child>,
}

/// Validated input for creating a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParent {
    pub name: String,
    pub age: u8,
    pub email: String,
    pub address: String,
}

/// Validated input for creating a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChild {
    pub name: String,
    pub age: u8,
    pub hobby: String,
    pub parent_id: i64,
}

/// Partial update for a parent; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentPatch {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Partial update for a child; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildPatch {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub hobby: Option<String>,
}

/// Offset/limit slice of an insertion-ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: usize,
    pub limit: usize,
}

impl PageWindow {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}
