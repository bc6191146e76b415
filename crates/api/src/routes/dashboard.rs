//! Admin dashboard.

use axum::{extract::State, Json};
use domain::models::DashboardAnalytics;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// GET /api/v1/admin/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<DashboardAnalytics>, ApiError> {
    let analytics = state.services.analytics.dashboard(&user.actor()).await?;
    Ok(Json(analytics))
}
