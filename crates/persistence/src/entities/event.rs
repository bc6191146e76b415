//! Event and registration entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{Event, EventRegistration};
use sqlx::FromRow;
use uuid::Uuid;

/// Event row with its registration count.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub event_type: String,
    pub location: String,
    pub virtual_link: Option<String>,
    pub max_attendees: Option<i32>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub registered_count: i64,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            event_date: entity.event_date,
            event_type: entity.event_type,
            location: entity.location,
            virtual_link: entity.virtual_link,
            max_attendees: entity.max_attendees,
            created_by: entity.created_by,
            created_at: entity.created_at,
            registered_count: entity.registered_count,
        }
    }
}

/// Database row mapping for the event_registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct EventRegistrationEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub registered_at: DateTime<Utc>,
    pub attended: bool,
}

impl From<EventRegistrationEntity> for EventRegistration {
    fn from(entity: EventRegistrationEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            registered_at: entity.registered_at,
            attended: entity.attended,
        }
    }
}
