//! Interest matching routes.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::models::{MatchQuery, MatchResult, OfferMatchResult};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Approved members ranked against the reference interests of a
/// collaboration type. Unknown or missing types yield an empty list.
///
/// GET /api/v1/matches?collaboration_type=mentorship
pub async fn compute_matches(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<MatchQuery>,
) -> Result<Json<Vec<MatchResult>>, ApiError> {
    let matches = state
        .services
        .matching
        .compute_matches(&user.actor(), query.collaboration_type.as_deref())
        .await?;
    Ok(Json(matches))
}

/// GET /api/v1/matches/offers?collaboration_type=mentorship
pub async fn offer_matches(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<MatchQuery>,
) -> Result<Json<Vec<OfferMatchResult>>, ApiError> {
    let matches = state
        .services
        .matching
        .offer_matches(&user.actor(), query.collaboration_type.as_deref())
        .await?;
    Ok(Json(matches))
}
