//! The caller's own member profile.

use axum::{extract::State, Json};
use domain::models::{MemberProfile, UpdateProfileRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Option<MemberProfile>>, ApiError> {
    let profile = state.services.profiles.get_mine(&user.actor()).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<MemberProfile>, ApiError> {
    let profile = state
        .services
        .profiles
        .update_mine(&user.actor(), request)
        .await?;
    Ok(Json(profile))
}
