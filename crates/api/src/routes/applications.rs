//! Membership application routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    ListApplicationsQuery, MemberApplication, ReviewApplicationRequest, SubmitApplicationRequest,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Submit the caller's membership application.
///
/// POST /api/v1/applications
pub async fn submit_application(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<MemberApplication>), ApiError> {
    let application = state
        .services
        .applications
        .submit(&user.actor(), request)
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// The caller's own application.
///
/// GET /api/v1/applications/me
pub async fn my_application(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Option<MemberApplication>>, ApiError> {
    let application = state
        .services
        .applications
        .my_application(&user.actor())
        .await?;
    Ok(Json(application))
}

/// List applications, optionally by status.
///
/// GET /api/v1/admin/applications?status=pending
pub async fn list_applications(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<Vec<MemberApplication>>, ApiError> {
    let applications = state
        .services
        .applications
        .list(&user.actor(), query.status)
        .await?;
    Ok(Json(applications))
}

/// Approve or reject a pending application.
///
/// POST /api/v1/admin/applications/:id/review
pub async fn review_application(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(application_id): Path<Uuid>,
    Json(request): Json<ReviewApplicationRequest>,
) -> Result<Json<MemberApplication>, ApiError> {
    let application = state
        .services
        .applications
        .review(&user.actor(), application_id, request.decision)
        .await?;
    Ok(Json(application))
}
