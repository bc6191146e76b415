//! Admin bootstrap service for initial setup.
//!
//! Creates the first admin user on startup if configured. Idempotent: an
//! existing account with the bootstrap email is left untouched.

use domain::models::{normalize_email, NewUser, Role, UserStatus};
use domain::repositories::UserRepository;
use domain::DomainError;
use shared::password::{check_password_policy, hash_password, PasswordError};
use tracing::{info, warn};

use crate::config::AdminBootstrapConfig;

/// Error types for admin bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Storage error: {0}")]
    Storage(#[from] DomainError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// What the bootstrap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    AlreadyExists,
    Created,
}

/// Bootstrap admin user if configured and not already present.
///
/// Call after migrations on startup.
pub async fn bootstrap_admin(
    users: &dyn UserRepository,
    config: &AdminBootstrapConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    if config.bootstrap_email.is_empty() {
        return Ok(BootstrapOutcome::NotConfigured);
    }

    if config.bootstrap_password.is_empty() {
        warn!(
            "TREA__ADMIN__BOOTSTRAP_EMAIL is set but TREA__ADMIN__BOOTSTRAP_PASSWORD is empty - skipping bootstrap"
        );
        return Ok(BootstrapOutcome::NotConfigured);
    }

    let email = normalize_email(&config.bootstrap_email);
    if users.find_by_email(&email).await?.is_some() {
        info!("Bootstrap admin email already exists - skipping bootstrap");
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    check_password_policy(&config.bootstrap_password)?;
    let password_hash = hash_password(&config.bootstrap_password)?;

    let created = users
        .create(NewUser {
            email,
            password_hash,
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            phone: None,
            status: UserStatus::Active,
            role: Role::Admin,
        })
        .await;

    let user = match created {
        Ok(user) => user,
        // Another instance won the race.
        Err(DomainError::DuplicateEmail) => return Ok(BootstrapOutcome::AlreadyExists),
        Err(e) => return Err(e.into()),
    };

    info!(
        email = %user.email,
        user_id = %user.id,
        "Bootstrap admin user created successfully"
    );
    warn!(
        "SECURITY: Remove TREA__ADMIN__BOOTSTRAP_EMAIL and TREA__ADMIN__BOOTSTRAP_PASSWORD \
         from configuration after initial setup"
    );

    Ok(BootstrapOutcome::Created)
}
