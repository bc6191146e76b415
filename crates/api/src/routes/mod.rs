//! HTTP route handlers.

pub mod applications;
pub mod auth;
pub mod collaborations;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod matches;
pub mod profile;
pub mod resources;
