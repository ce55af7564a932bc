//! In-memory repository implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Repository;
use crate::error::{StoreError, StoreResult};
use crate::models::{Child, ChildPatch, NewChild, NewParent, PageWindow, Parent, ParentPatch};

const DUPLICATE_EMAIL: &str = "Parent with this email already exists.";

#[derive(Debug, Clone)]
struct ParentRow {
    id: i64,
    name: String,
    age: u8,
    email: String,
    address: String,
}

impl ParentRow {
    fn with_children(&self, children: Vec<Child>) -> Parent {
        Parent {
            id: self.id,
            name: self.name.clone(),
            age: self.age,
            email: self.email.clone(),
            address: self.address.clone(),
            children,
        }
    }
}

/// Both tables live behind one lock so a cascade delete is a single
/// critical section.
#[derive(Debug, Default)]
struct Tables {
    parents: BTreeMap<i64, ParentRow>,
    children: BTreeMap<i64, Child>,
    next_parent_id: i64,
    next_child_id: i64,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.parents
            .values()
            .any(|p| Some(p.id) != except && p.email.eq_ignore_ascii_case(email))
    }

    fn children_of(&self, parent_id: i64) -> Vec<Child> {
        self.children
            .values()
            .filter(|c| c.parent_id == parent_id)
            .cloned()
            .collect()
    }

    fn parent_view(&self, id: i64) -> Option<Parent> {
        self.parents
            .get(&id)
            .map(|row| row.with_children(self.children_of(id)))
    }
}

/// In-memory storage backend.
///
/// Ids are assigned from per-table counters starting at 1, so BTreeMap order
/// is insertion order. Data is lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create_parent(&self, parent: NewParent) -> StoreResult<Parent> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&parent.email, None) {
            return Err(StoreError::Constraint(DUPLICATE_EMAIL.to_string()));
        }

        tables.next_parent_id += 1;
        let row = ParentRow {
            id: tables.next_parent_id,
            name: parent.name,
            age: parent.age,
            email: parent.email,
            address: parent.address,
        };
        let view = row.with_children(Vec::new());
        tables.parents.insert(row.id, row);
        Ok(view)
    }

    async fn create_child(&self, child: NewChild) -> StoreResult<Child> {
        let mut tables = self.tables.write().await;
        if !tables.parents.contains_key(&child.parent_id) {
            return Err(StoreError::Constraint(format!(
                "There is no parent with parent_id={}",
                child.parent_id
            )));
        }

        tables.next_child_id += 1;
        let record = Child {
            id: tables.next_child_id,
            name: child.name,
            age: child.age,
            hobby: child.hobby,
            parent_id: child.parent_id,
        };
        tables.children.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_parents(&self, window: PageWindow) -> StoreResult<Vec<Parent>> {
        let tables = self.tables.read().await;
        let page: Vec<&ParentRow> = tables
            .parents
            .values()
            .skip(window.skip)
            .take(window.limit)
            .collect();

        let mut grouped: HashMap<i64, Vec<Child>> =
            page.iter().map(|row| (row.id, Vec::new())).collect();
        for child in tables.children.values() {
            if let Some(children) = grouped.get_mut(&child.parent_id) {
                children.push(child.clone());
            }
        }

        Ok(page
            .into_iter()
            .map(|row| row.with_children(grouped.remove(&row.id).unwrap_or_default()))
            .collect())
    }

    async fn list_children(&self, window: PageWindow) -> StoreResult<Vec<Child>> {
        let tables = self.tables.read().await;
        Ok(tables
            .children
            .values()
            .skip(window.skip)
            .take(window.limit)
            .cloned()
            .collect())
    }

    async fn get_parent(&self, id: i64) -> StoreResult<Parent> {
        let tables = self.tables.read().await;
        tables
            .parent_view(id)
            .ok_or_else(|| StoreError::NotFound(format!("There is no parent with parent_id={}", id)))
    }

    async fn get_child(&self, id: i64) -> StoreResult<Child> {
        let tables = self.tables.read().await;
        tables
            .children
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("There is no child with child_id={}", id)))
    }

    async fn update_parent(&self, id: i64, patch: ParentPatch) -> StoreResult<Parent> {
        let mut tables = self.tables.write().await;
        if !tables.parents.contains_key(&id) {
            return Err(StoreError::NotFound("Parent not found".to_string()));
        }
        if let Some(email) = patch.email.as_deref() {
            if tables.email_taken(email, Some(id)) {
                return Err(StoreError::Constraint(DUPLICATE_EMAIL.to_string()));
            }
        }

        if let Some(row) = tables.parents.get_mut(&id) {
            if let Some(name) = patch.name {
                row.name = name;
            }
            if let Some(age) = patch.age {
                row.age = age;
            }
            if let Some(email) = patch.email {
                row.email = email;
            }
            if let Some(address) = patch.address {
                row.address = address;
            }
        }

        tables
            .parent_view(id)
            .ok_or_else(|| StoreError::NotFound("Parent not found".to_string()))
    }

    async fn update_child(&self, id: i64, patch: ChildPatch) -> StoreResult<Child> {
        let mut tables = self.tables.write().await;
        let child = tables
            .children
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Child not found".to_string()))?;

        if let Some(name) = patch.name {
            child.name = name;
        }
        if let Some(age) = patch.age {
            child.age = age;
        }
        if let Some(hobby) = patch.hobby {
            child.hobby = hobby;
        }
        Ok(child.clone())
    }

    async fn delete_parent(&self, id: i64) -> StoreResult<usize> {
        let mut tables = self.tables.write().await;
        if !tables.parents.contains_key(&id) {
            return Err(StoreError::NotFound("Parent not found".to_string()));
        }

        // Children first, then the parent, under the same write guard.
        let before = tables.children.len();
        tables.children.retain(|_, child| child.parent_id != id);
        let removed = before - tables.children.len();
        tables.parents.remove(&id);
        Ok(removed)
    }

    async fn delete_child(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .children
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound("Child not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_parent(name: &str, email: &str) -> NewParent {
        NewParent {
            name: name.to_string(),
            age: 40,
            email: email.to_string(),
            address: "Poland".to_string(),
        }
    }

    fn new_child(name: &str, parent_id: i64) -> NewChild {
        NewChild {
            name: name.to_string(),
            age: 10,
            hobby: "Drawing".to_string(),
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryRepository::new();
        let a = repo.create_parent(new_parent("A", "a@x.com")).await.unwrap();
        let b = repo.create_parent(new_parent("B", "b@x.com")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.children.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_case_insensitively() {
        let repo = InMemoryRepository::new();
        repo.create_parent(new_parent("A", "a@x.com")).await.unwrap();

        let err = repo
            .create_parent(new_parent("B", "A@X.COM"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Constraint(DUPLICATE_EMAIL.to_string()));
    }

    #[tokio::test]
    async fn test_child_requires_existing_parent() {
        let repo = InMemoryRepository::new();
        let err = repo.create_child(new_child("C", 42)).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_list_parents_embeds_children_and_slices() {
        let repo = InMemoryRepository::new();
        let a = repo.create_parent(new_parent("A", "a@x.com")).await.unwrap();
        let b = repo.create_parent(new_parent("B", "b@x.com")).await.unwrap();
        repo.create_child(new_child("C1", a.id)).await.unwrap();
        repo.create_child(new_child("C2", b.id)).await.unwrap();
        repo.create_child(new_child("C3", a.id)).await.unwrap();

        let all = repo.list_parents(PageWindow::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        let names: Vec<&str> = all[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["C1", "C3"]);
        assert_eq!(all[1].children.len(), 1);

        let second = repo.list_parents(PageWindow::new(1, 1)).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, b.id);

        let beyond = repo.list_parents(PageWindow::new(5, 10)).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_update_parent_patches_present_fields() {
        let repo = InMemoryRepository::new();
        let a = repo.create_parent(new_parent("A", "a@x.com")).await.unwrap();

        let patch = ParentPatch {
            name: Some("Updated".to_string()),
            ..Default::default()
        };
        let updated = repo.update_parent(a.id, patch).await.unwrap();
        assert_eq!(updated.name, "Updated");
        assert_eq!(updated.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_parent_email_conflict() {
        let repo = InMemoryRepository::new();
        let a = repo.create_parent(new_parent("A", "a@x.com")).await.unwrap();
        repo.create_parent(new_parent("B", "b@x.com")).await.unwrap();

        let keep_own = ParentPatch {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        assert!(repo.update_parent(a.id, keep_own).await.is_ok());

        let steal = ParentPatch {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        let err = repo.update_parent(a.id, steal).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_update_missing_records() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.update_parent(1, ParentPatch::default()).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            repo.update_child(1, ChildPatch::default()).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_parent_cascades() {
        let repo = InMemoryRepository::new();
        let a = repo.create_parent(new_parent("A", "a@x.com")).await.unwrap();
        let b = repo.create_parent(new_parent("B", "b@x.com")).await.unwrap();
        let c1 = repo.create_child(new_child("C1", a.id)).await.unwrap();
        repo.create_child(new_child("C2", a.id)).await.unwrap();
        let other = repo.create_child(new_child("C3", b.id)).await.unwrap();

        let removed = repo.delete_parent(a.id).await.unwrap();
        assert_eq!(removed, 2);
        assert!(matches!(repo.get_parent(a.id).await, Err(StoreError::NotFound(_))));
        assert!(matches!(repo.get_child(c1.id).await, Err(StoreError::NotFound(_))));
        assert_eq!(repo.get_child(other.id).await.unwrap().parent_id, b.id);
    }

    #[tokio::test]
    async fn test_delete_child() {
        let repo = InMemoryRepository::new();
        let a = repo.create_parent(new_parent("A", "a@x.com")).await.unwrap();
        let c = repo.create_child(new_child("C", a.id)).await.unwrap();

        repo.delete_child(c.id).await.unwrap();
        assert!(repo.get_parent(a.id).await.unwrap().children.is_empty());
        assert!(matches!(repo.delete_child(c.id).await, Err(StoreError::NotFound(_))));
    }
}
