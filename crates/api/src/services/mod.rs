//! Services owned by the HTTP layer.

pub mod admin_bootstrap;
pub mod auth;

pub use admin_bootstrap::{bootstrap_admin, BootstrapError, BootstrapOutcome};
pub use auth::{AuthError, AuthService};
