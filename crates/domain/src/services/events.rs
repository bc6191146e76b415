//! Events and the registration ledger.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::{
    Actor, Capability, CreateEventRequest, Event, EventRegistration, NewEvent,
};
use crate::repositories::{EventRepository, UserRepository};
use crate::services::access::authorize;
use crate::services::notification::{dispatch, NotificationService};

#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventRepository>,
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn NotificationService>,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            events,
            users,
            notifier,
        }
    }

    pub async fn create(&self, actor: &Actor, request: CreateEventRequest) -> DomainResult<Event> {
        authorize(actor, Capability::ManageEvents)?;
        request.validate()?;

        let event = self
            .events
            .create(NewEvent::from_request(actor.user_id, request, Utc::now()))
            .await?;

        tracing::info!(
            event_id = %event.id,
            created_by = %actor.user_id,
            max_attendees = ?event.max_attendees,
            "Event created"
        );
        Ok(event)
    }

    /// Events ordered by date, with registration counts.
    pub async fn list(&self, upcoming_only: bool) -> DomainResult<Vec<Event>> {
        let after = upcoming_only.then(Utc::now);
        self.events.list(after).await
    }

    pub async fn get(&self, event_id: Uuid) -> DomainResult<Event> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event", event_id))
    }

    /// Registers the actor for an event.
    ///
    /// The duplicate check, the capacity check and the insert happen as one
    /// atomic step in storage.
    pub async fn register(&self, actor: &Actor, event_id: Uuid) -> DomainResult<EventRegistration> {
        authorize(actor, Capability::RegisterForEvents)?;

        let registration = match self
            .events
            .register(event_id, actor.user_id, Utc::now())
            .await
        {
            Ok(registration) => registration,
            Err(e) => {
                if matches!(
                    e,
                    DomainError::CapacityExceeded { .. } | DomainError::AlreadyRegistered { .. }
                ) {
                    metrics::counter!(
                        "event_registration_rejections_total",
                        "reason" => e.code()
                    )
                    .increment(1);
                }
                return Err(e);
            }
        };

        metrics::counter!("event_registrations_total").increment(1);
        tracing::info!(
            event_id = %event_id,
            user_id = %actor.user_id,
            registration_id = %registration.id,
            "Registered for event"
        );

        self.send_confirmation(actor.user_id, event_id).await;
        Ok(registration)
    }

    async fn send_confirmation(&self, user_id: Uuid, event_id: Uuid) {
        let (user, event) = match (
            self.users.find_by_id(user_id).await,
            self.events.find_by_id(event_id).await,
        ) {
            (Ok(Some(user)), Ok(Some(event))) => (user, event),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "Failed to load registration details for notification");
                return;
            }
            _ => return,
        };

        let subject = format!("Registration Confirmed: {}", event.title);
        let body = format!(
            "You're registered for {} on {}",
            event.title,
            event.event_date.format("%Y-%m-%d %H:%M UTC")
        );
        dispatch(self.notifier.as_ref(), &user.email, &subject, &body).await;
    }
}
