//! Event listing, creation and registration.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateEventRequest, Event, EventRegistration, ListEventsQuery};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// GET /api/v1/events?upcoming=true
pub async fn list_events(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.services.events.list(query.upcoming).await?;
    Ok(Json(events))
}

/// GET /api/v1/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let event = state.services.events.get(event_id).await?;
    Ok(Json(event))
}

/// Create an event.
///
/// POST /api/v1/admin/events
pub async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = state.services.events.create(&user.actor(), request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Register the caller for an event.
///
/// POST /api/v1/events/:id/register
///
/// Returns 409 when already registered or when the event is full.
pub async fn register_for_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<(StatusCode, Json<EventRegistration>), ApiError> {
    let registration = state
        .services
        .events
        .register(&user.actor(), event_id)
        .await?;
    Ok((StatusCode::CREATED, Json(registration)))
}
