//! Resource library routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateResourceRequest, Resource};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Resources visible to the caller's role, newest first.
///
/// GET /api/v1/resources
pub async fn list_resources(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let resources = state.services.resources.list(&user.actor()).await?;
    Ok(Json(resources))
}

/// Count a download and return the resource with its file URL.
///
/// POST /api/v1/resources/:id/download
pub async fn download_resource(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(resource_id): Path<Uuid>,
) -> Result<Json<Resource>, ApiError> {
    let resource = state
        .services
        .resources
        .record_download(&user.actor(), resource_id)
        .await?;
    Ok(Json(resource))
}

/// POST /api/v1/admin/resources
pub async fn create_resource(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let resource = state
        .services
        .resources
        .create(&user.actor(), request)
        .await?;
    Ok((StatusCode::CREATED, Json(resource)))
}
