//! Domain layer for the TREA members backend.
//!
//! This crate contains:
//! - Domain models (User, MemberApplication, Event, CollaborationOffer, ...)
//! - The access policy and the interest matcher
//! - Repository traits implemented by the persistence crate
//! - Business logic services
//! - Domain error types

pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

pub use error::{DomainError, DomainResult};
