//! Error types for the record service
//!
//! One enum per layer: cache, persistence and transport. Cache errors never
//! reach the transport layer; store errors map onto API errors one-to-one.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Failures raised by a cache store backend.
///
/// These are always absorbed by the cache layer and logged.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend could not be reached
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Backend rejected the operation
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),

    /// Entry could not be encoded or decoded
    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

// == Store Error Enum ==
/// Failures raised by the persistence store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record matched the lookup
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness or reference constraint violated
    #[error("{0}")]
    Constraint(String),
}

// == API Error Enum ==
/// Unified error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Target record or page is absent
    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key or dangling reference
    #[error("{0}")]
    Conflict(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Constraint(msg) => ApiError::Conflict(msg),
        }
    }
}

// Extractor rejections are input validation failures.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for handlers and the record service.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Result type for cache store operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Result type for persistence store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
