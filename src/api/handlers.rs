//! API Handlers
//!
//! HTTP request handlers for the parent and child endpoints. Handlers only
//! validate and translate; caching decisions live in the record service.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::cache::{CacheStore, ListCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    Child, ChildCreate, ChildUpdate, DeleteResponse, HealthResponse, ListQuery, Parent,
    ParentCreate, ParentUpdate, StatsResponse,
};
use crate::service::RecordService;
use crate::store::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: RecordService,
}

impl AppState {
    pub fn new(service: RecordService) -> Self {
        Self { service }
    }

    /// Wires a repository and a cache store using the configured TTL and
    /// empty list policy.
    pub fn from_parts(
        repo: Arc<dyn Repository>,
        cache: Arc<dyn CacheStore>,
        config: &Config,
    ) -> Self {
        let lists = ListCache::new(cache, config.cache_ttl())
            .with_empty_list_policy(config.empty_list_policy);
        Self::new(RecordService::new(repo, lists))
    }
}

// == Parents ==

/// Handler for POST /parents
pub async fn create_parent_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ParentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Parent>)> {
    let Json(req) = payload?;
    let new_parent = req.into_new().map_err(ApiError::Validation)?;
    let parent = state.service.create_parent(new_parent).await?;
    Ok((StatusCode::CREATED, Json(parent)))
}

/// Handler for GET /parents?skip=&limit=
pub async fn list_parents_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Parent>>> {
    let Query(query) = query?;
    let parents = state.service.list_parents(query.into()).await?;
    Ok(Json(parents))
}

/// Handler for GET /parents/:id
pub async fn get_parent_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Parent>> {
    let Path(id) = id?;
    Ok(Json(state.service.get_parent(id).await?))
}

/// Handler for PUT /parents/:id
pub async fn update_parent_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<ParentUpdate>, JsonRejection>,
) -> Result<Json<Parent>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let patch = req.into_patch().map_err(ApiError::Validation)?;
    Ok(Json(state.service.update_parent(id, patch).await?))
}

/// Handler for DELETE /parents/:id
pub async fn delete_parent_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.service.delete_parent(id).await?;
    Ok(Json(DeleteResponse::parent(id)))
}

// == Children ==

/// Handler for POST /children
pub async fn create_child_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChildCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Child>)> {
    let Json(req) = payload?;
    let new_child = req.into_new().map_err(ApiError::Validation)?;
    let child = state.service.create_child(new_child).await?;
    Ok((StatusCode::CREATED, Json(child)))
}

/// Handler for GET /children?skip=&limit=
pub async fn list_children_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Child>>> {
    let Query(query) = query?;
    let children = state.service.list_children(query.into()).await?;
    Ok(Json(children))
}

/// Handler for GET /children/:id
pub async fn get_child_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Child>> {
    let Path(id) = id?;
    Ok(Json(state.service.get_child(id).await?))
}

/// Handler for PUT /children/:id
pub async fn update_child_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<ChildUpdate>, JsonRejection>,
) -> Result<Json<Child>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let patch = req.into_patch().map_err(ApiError::Validation)?;
    Ok(Json(state.service.update_child(id, patch).await?))
}

/// Handler for DELETE /children/:id
pub async fn delete_child_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.service.delete_child(id).await?;
    Ok(Json(DeleteResponse::child(id)))
}

// == Operational ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.cache_stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::RwLock;

    use crate::cache::MemoryCache;
    use crate::store::InMemoryRepository;

    fn test_state() -> AppState {
        AppState::from_parts(
            Arc::new(InMemoryRepository::new()),
            Arc::new(RwLock::new(MemoryCache::new(100))),
            &Config::default(),
        )
    }

    fn parent_req(email: &str) -> ParentCreate {
        ParentCreate {
            name: "Parent 1".to_string(),
            age: 40,
            email: email.to_string(),
            address: "Poland".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_parent_handler() {
        let state = test_state();

        let (status, Json(created)) =
            create_parent_handler(State(state.clone()), Ok(Json(parent_req("u@example.com"))))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(fetched) = get_parent_handler(State(state), Ok(Path(created.id)))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_parent_invalid_age() {
        let state = test_state();
        let mut req = parent_req("u@example.com");
        req.age = 18;

        let result = create_parent_handler(State(state), Ok(Json(req))).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_parents_empty_is_not_found() {
        let state = test_state();

        let result = list_parents_handler(State(state), Ok(Query(ListQuery::default()))).await;
        assert!(matches!(result, Err(ApiError::NotFound(ref m)) if m == "No parents found"));
    }

    #[tokio::test]
    async fn test_delete_child_handler() {
        let state = test_state();
        let (_, Json(parent)) =
            create_parent_handler(State(state.clone()), Ok(Json(parent_req("u@example.com"))))
                .await
                .unwrap();
        let req = ChildCreate {
            name: "Child 1".to_string(),
            age: 10,
            hobby: "Drawing".to_string(),
            parent_id: parent.id,
        };
        let (_, Json(child)) = create_child_handler(State(state.clone()), Ok(Json(req)))
            .await
            .unwrap();

        let Json(resp) = delete_child_handler(State(state.clone()), Ok(Path(child.id)))
            .await
            .unwrap();
        assert_eq!(
            resp.detail,
            format!("Child with ID {} deleted successfully", child.id)
        );

        let result = get_child_handler(State(state), Ok(Path(child.id))).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let response = stats_handler(State(test_state())).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
