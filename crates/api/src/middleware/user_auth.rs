//! User JWT authentication middleware.
//!
//! Validates the bearer token, then loads the user so the role and status
//! used for authorization are always current.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::models::{Actor, Role, UserStatus};
use shared::jwt::extract_user_id;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated caller, stored in request extensions.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub user_id: Uuid,
    pub role: Role,
    /// JWT ID of the presented token.
    pub jti: String,
}

impl UserAuth {
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves the caller from the Authorization header.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<UserAuth, ApiError> {
    let token = bearer_token(headers).ok_or_else(|| {
        ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
    })?;

    let claims = state.jwt.validate_token(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;
    let user_id = extract_user_id(&claims)
        .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

    let user = state
        .repos
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

    if user.status == UserStatus::Inactive {
        return Err(ApiError::Forbidden("User is disabled".to_string()));
    }

    Ok(UserAuth {
        user_id: user.id,
        role: user.role,
        jti: claims.jti,
    })
}

/// Middleware that requires JWT user authentication.
///
/// Stores [`UserAuth`] in request extensions for downstream handlers and the
/// rate limiter.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()).await {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(bearer_token(&headers).is_none());

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_actor_from_auth() {
        let auth = UserAuth {
            user_id: Uuid::new_v4(),
            role: Role::Alumni,
            jti: "jti".to_string(),
        };
        let actor = auth.actor();
        assert_eq!(actor.user_id, auth.user_id);
        assert_eq!(actor.role, Role::Alumni);
    }
}
