//! Persistence layer for the TREA members backend.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - PostgreSQL repository implementations
//! - An in-memory store implementing the same repository traits
//! - Query metrics

pub mod db;
pub mod entities;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod repositories;

pub use memory::MemoryStore;
pub use repositories::postgres_repositories;
