//! Background Tasks Module
//!
//! - TTL sweep: drops expired pages from the in-memory list cache

mod cleanup;

pub use cleanup::spawn_cleanup_task;
