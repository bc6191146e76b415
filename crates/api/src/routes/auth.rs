//! Account registration and login.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Register a new account.
///
/// POST /api/v1/auth/register
///
/// New accounts start as pending members.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let request = request.normalized();
    request.validate()?;

    let user = state.auth.register(request).await?;
    info!(user_id = %user.id, "Account registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Exchange credentials for an access token.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let request = request.normalized();
    request.validate()?;

    let response = state.auth.login(request).await?;
    Ok(Json(response))
}
