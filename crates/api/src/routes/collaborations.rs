//! Alumni collaboration offers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{CollaborationOffer, SubmitCollaborationRequest, SubmitCollaborationResponse};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// POST /api/v1/collaborations
pub async fn submit_collaboration(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<SubmitCollaborationRequest>,
) -> Result<(StatusCode, Json<SubmitCollaborationResponse>), ApiError> {
    let response = state
        .services
        .collaborations
        .submit(&user.actor(), request)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/collaborations/me
pub async fn my_collaborations(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<CollaborationOffer>>, ApiError> {
    let offers = state
        .services
        .collaborations
        .list_mine(&user.actor())
        .await?;
    Ok(Json(offers))
}

/// POST /api/v1/collaborations/:id/deactivate
pub async fn deactivate_collaboration(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(offer_id): Path<Uuid>,
) -> Result<Json<CollaborationOffer>, ApiError> {
    let offer = state
        .services
        .collaborations
        .deactivate(&user.actor(), offer_id)
        .await?;
    Ok(Json(offer))
}
