//! Record Service
//!
//! Composes the persistence store with the list cache. Every mutation is
//! persisted first; only a successful write triggers invalidation, and
//! invalidation never changes the outcome reported to the caller.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{EntityKind, Invalidator, ListCache, ListCacheStats, Mutation};
use crate::error::StoreResult;
use crate::models::{Child, ChildPatch, NewChild, NewParent, PageWindow, Parent, ParentPatch};
use crate::store::Repository;

#[derive(Clone)]
pub struct RecordService {
    repo: Arc<dyn Repository>,
    lists: Arc<ListCache>,
    invalidator: Invalidator,
}

impl RecordService {
    pub fn new(repo: Arc<dyn Repository>, lists: ListCache) -> Self {
        let invalidator = lists.invalidator();
        Self {
            repo,
            lists: Arc::new(lists),
            invalidator,
        }
    }

    // == Reads ==

    pub async fn list_parents(&self, window: PageWindow) -> StoreResult<Vec<Parent>> {
        self.lists
            .get_list(EntityKind::Parents, window, |w| self.repo.list_parents(w))
            .await
    }

    pub async fn list_children(&self, window: PageWindow) -> StoreResult<Vec<Child>> {
        self.lists
            .get_list(EntityKind::Children, window, |w| self.repo.list_children(w))
            .await
    }

    /// Single-record reads are not cached.
    pub async fn get_parent(&self, id: i64) -> StoreResult<Parent> {
        self.repo.get_parent(id).await
    }

    pub async fn get_child(&self, id: i64) -> StoreResult<Child> {
        self.repo.get_child(id).await
    }

    // == Mutations ==

    pub async fn create_parent(&self, parent: NewParent) -> StoreResult<Parent> {
        let created = self.repo.create_parent(parent).await?;
        self.invalidator.invalidate_for(Mutation::CreateParent).await;
        debug!(parent_id = created.id, "Parent created");
        Ok(created)
    }

    pub async fn create_child(&self, child: NewChild) -> StoreResult<Child> {
        let created = self.repo.create_child(child).await?;
        self.invalidator.invalidate_for(Mutation::CreateChild).await;
        debug!(child_id = created.id, parent_id = created.parent_id, "Child created");
        Ok(created)
    }

    pub async fn update_parent(&self, id: i64, patch: ParentPatch) -> StoreResult<Parent> {
        let updated = self.repo.update_parent(id, patch).await?;
        self.invalidator.invalidate_for(Mutation::UpdateParent).await;
        debug!(parent_id = id, "Parent updated");
        Ok(updated)
    }

    pub async fn update_child(&self, id: i64, patch: ChildPatch) -> StoreResult<Child> {
        let updated = self.repo.update_child(id, patch).await?;
        self.invalidator.invalidate_for(Mutation::UpdateChild).await;
        debug!(child_id = id, "Child updated");
        Ok(updated)
    }

    pub async fn delete_parent(&self, id: i64) -> StoreResult<()> {
        let cascaded = self.repo.delete_parent(id).await?;
        self.invalidator.invalidate_for(Mutation::DeleteParent).await;
        debug!(parent_id = id, cascaded, "Parent deleted");
        Ok(())
    }

    pub async fn delete_child(&self, id: i64) -> StoreResult<()> {
        self.repo.delete_child(id).await?;
        self.invalidator.invalidate_for(Mutation::DeleteChild).await;
        debug!(child_id = id, "Child deleted");
        Ok(())
    }

    pub fn cache_stats(&self) -> ListCacheStats {
        self.lists.stats()
    }
}
