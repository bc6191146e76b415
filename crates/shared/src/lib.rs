//! Shared utilities for the TREA members backend.
//!
//! This crate provides functionality used by the other crates:
//! - Password hashing with Argon2id
//! - Access token issuing and validation
//! - Field validators used by request DTOs

pub mod jwt;
pub mod password;
pub mod validation;
