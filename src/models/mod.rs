//! Records, request and response models for the record service API
//!
//! This module defines the domain records and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod entities;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use entities::{
    Child, ChildPatch, NewChild, NewParent, PageWindow, Parent, ParentPatch,
};
pub use requests::{ChildCreate, ChildUpdate, ListQuery, ParentCreate, ParentUpdate};
pub use responses::{DeleteResponse, ErrorResponse, HealthResponse, StatsResponse};
