//! Persistence Module
//!
//! The source of truth for parents and children. The cache layer only ever
//! sees this through the [`Repository`] trait.

mod memory;

pub use memory::InMemoryRepository;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{Child, ChildPatch, NewChild, NewParent, PageWindow, Parent, ParentPatch};

/// Record storage with referential integrity.
///
/// Implementations enforce email uniqueness (case-insensitive), reject
/// children whose parent does not exist, and cascade parent deletes to the
/// parent's children. Pages are ordered by insertion.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn create_parent(&self, parent: NewParent) -> StoreResult<Parent>;

    async fn create_child(&self, child: NewChild) -> StoreResult<Child>;

    /// Returns a page of parents, each with its children embedded.
    async fn list_parents(&self, window: PageWindow) -> StoreResult<Vec<Parent>>;

    async fn list_children(&self, window: PageWindow) -> StoreResult<Vec<Child>>;

    async fn get_parent(&self, id: i64) -> StoreResult<Parent>;

    async fn get_child(&self, id: i64) -> StoreResult<Child>;

    async fn update_parent(&self, id: i64, patch: ParentPatch) -> StoreResult<Parent>;

    async fn update_child(&self, id: i64, patch: ChildPatch) -> StoreResult<Child>;

    /// Deletes the parent and all of its children in one step.
    ///
    /// Returns the number of children removed with it.
    async fn delete_parent(&self, id: i64) -> StoreResult<usize>;

    async fn delete_child(&self, id: i64) -> StoreResult<()>;
}
