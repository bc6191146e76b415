//! Domain error taxonomy.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{ApplicationStatus, Capability};

/// Errors produced by domain services and repository implementations.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("An application already exists for user {user_id}")]
    DuplicateApplication { user_id: Uuid },

    #[error("User {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { event_id: Uuid, user_id: Uuid },

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Event {event_id} is full ({max_attendees} attendees)")]
    CapacityExceeded { event_id: Uuid, max_attendees: i32 },

    #[error("Application is already {current}")]
    InvalidTransition { current: ApplicationStatus },

    #[error("Missing capability: {0}")]
    Permission(Capability),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::DuplicateApplication { .. } => "duplicate_application",
            DomainError::AlreadyRegistered { .. } => "already_registered",
            DomainError::DuplicateEmail => "duplicate_email",
            DomainError::NotFound { .. } => "not_found",
            DomainError::CapacityExceeded { .. } => "capacity_exceeded",
            DomainError::InvalidTransition { .. } => "invalid_transition",
            DomainError::Permission(_) => "forbidden",
            DomainError::InvalidCredentials => "invalid_credentials",
            DomainError::Storage(_) => "internal_error",
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::Validation(errors.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
