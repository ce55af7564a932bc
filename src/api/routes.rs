//! API Routes
//!
//! Configures the Axum router with the record endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_child_handler, create_parent_handler, delete_child_handler, delete_parent_handler,
    get_child_handler, get_parent_handler, health_handler, list_children_handler,
    list_parents_handler, stats_handler, update_child_handler, update_parent_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /parents`, `GET /parents?skip=&limit=`
/// - `GET|PUT|DELETE /parents/:id`
/// - `POST /children`, `GET /children?skip=&limit=`
/// - `GET|PUT|DELETE /children/:id`
/// - `GET /stats` - List cache statistics
/// - `GET /health` - Health check endpoint
///
/// Collection paths answer with and without a trailing slash.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let parents = get(list_parents_handler).post(create_parent_handler);
    let children = get(list_children_handler).post(create_child_handler);

    Router::new()
        .route("/parents", parents.clone())
        .route("/parents/", parents)
        .route(
            "/parents/:id",
            get(get_parent_handler)
                .put(update_parent_handler)
                .delete(delete_parent_handler),
        )
        .route("/children", children.clone())
        .route("/children/", children)
        .route(
            "/children/:id",
            get(get_child_handler)
                .put(update_child_handler)
                .delete(delete_child_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
