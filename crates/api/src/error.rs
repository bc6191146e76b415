use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

/// HTTP status for a domain error.
pub fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::DuplicateApplication { .. }
        | DomainError::AlreadyRegistered { .. }
        | DomainError::DuplicateEmail
        | DomainError::CapacityExceeded { .. }
        | DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Permission(_) => StatusCode::FORBIDDEN,
        DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Domain(DomainError::Storage(msg)) => {
                tracing::error!(error = %msg, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
            ApiError::Domain(err) => (domain_status(err), err.code(), err.to_string()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationDetail {
                    field: field.to_string(),
                    message: e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                })
            })
            .collect();

        let message = if details.len() == 1 {
            details[0].message.clone()
        } else {
            format!("{} validation errors", details.len())
        };

        ApiError::Validation(message)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => ApiError::Domain(DomainError::DuplicateEmail),
            AuthError::WeakPassword(msg) => ApiError::Validation(msg),
            AuthError::InvalidCredentials => ApiError::Domain(DomainError::InvalidCredentials),
            AuthError::UserDisabled => ApiError::Forbidden("User is disabled".to_string()),
            AuthError::Domain(e) => ApiError::Domain(e),
            AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
            AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use domain::models::{ApplicationStatus, Capability};
    use uuid::Uuid;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_domain_status_mapping() {
        let id = Uuid::new_v4();
        let cases = [
            (DomainError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::DuplicateApplication { user_id: id },
                StatusCode::CONFLICT,
            ),
            (
                DomainError::AlreadyRegistered {
                    event_id: id,
                    user_id: id,
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::DuplicateEmail, StatusCode::CONFLICT),
            (
                DomainError::CapacityExceeded {
                    event_id: id,
                    max_attendees: 1,
                },
                StatusCode::CONFLICT,
            ),
            (
                DomainError::InvalidTransition {
                    current: ApplicationStatus::Approved,
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::not_found("Event", id), StatusCode::NOT_FOUND),
            (
                DomainError::Permission(Capability::ReviewApplications),
                StatusCode::FORBIDDEN,
            ),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                DomainError::Storage("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_domain_error_body_uses_stable_code() {
        let response = ApiError::from(DomainError::CapacityExceeded {
            event_id: Uuid::new_v4(),
            max_attendees: 10,
        })
        .into_response();

        let body = body_json(response).await;
        assert_eq!(body["error"], "capacity_exceeded");
        assert!(body["message"].as_str().unwrap().contains("full"));
    }

    #[tokio::test]
    async fn test_storage_message_is_hidden() {
        let response =
            ApiError::from(DomainError::Storage("connection refused".into())).into_response();

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[test]
    fn test_api_error_unauthorized() {
        let response = ApiError::Unauthorized("missing token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_api_error_service_unavailable() {
        let response = ApiError::ServiceUnavailable("database".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_auth_error_mapping() {
        let disabled = ApiError::from(AuthError::UserDisabled).into_response();
        assert_eq!(disabled.status(), StatusCode::FORBIDDEN);

        let taken = ApiError::from(AuthError::EmailAlreadyExists).into_response();
        assert_eq!(taken.status(), StatusCode::CONFLICT);

        let weak = ApiError::from(AuthError::WeakPassword("too short".into())).into_response();
        assert_eq!(weak.status(), StatusCode::BAD_REQUEST);
    }
}
