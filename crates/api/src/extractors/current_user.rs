//! Authenticated caller extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::Actor;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::{authenticate, UserAuth};

/// The authenticated caller.
///
/// Reuses the identity inserted by `require_user_auth` when the route sits
/// behind it, and validates the bearer token itself otherwise.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserAuth);

impl CurrentUser {
    pub fn actor(&self) -> Actor {
        self.0.actor()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<UserAuth>() {
            return Ok(CurrentUser(auth.clone()));
        }

        authenticate(state, &parts.headers).await.map(CurrentUser)
    }
}
