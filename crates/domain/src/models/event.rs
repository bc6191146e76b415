//! Event and registration domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An event members can register for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub event_type: String,
    pub location: String,
    pub virtual_link: Option<String>,
    /// `None` means unlimited.
    pub max_attendees: Option<i32>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub registered_count: i64,
}

impl Event {
    /// Whether another registration would exceed capacity.
    pub fn is_full(&self) -> bool {
        match self.max_attendees {
            Some(max) => self.registered_count >= i64::from(max),
            None => false,
        }
    }

    pub fn spots_remaining(&self) -> Option<i64> {
        self.max_attendees
            .map(|max| (i64::from(max) - self.registered_count).max(0))
    }
}

/// A user's registration for an event. Unique per (event, user).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventRegistration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub registered_at: DateTime<Utc>,
    pub attended: bool,
}

/// Request payload for creating an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 4000, message = "Description must be at most 4000 characters"))]
    #[serde(default)]
    pub description: String,

    pub event_date: DateTime<Utc>,

    #[validate(length(min = 1, max = 50, message = "Event type must be 1-50 characters"))]
    pub event_type: String,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    #[serde(default)]
    pub location: String,

    #[validate(url(message = "Virtual link must be a valid URL"))]
    pub virtual_link: Option<String>,

    #[validate(range(min = 1, message = "max_attendees must be at least 1"))]
    pub max_attendees: Option<i32>,
}

/// Fields needed to insert an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub event_type: String,
    pub location: String,
    pub virtual_link: Option<String>,
    pub max_attendees: Option<i32>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl NewEvent {
    pub fn from_request(
        created_by: Uuid,
        request: CreateEventRequest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: request.title,
            description: request.description,
            event_date: request.event_date,
            event_type: request.event_type,
            location: request.location,
            virtual_link: request.virtual_link,
            max_attendees: request.max_attendees,
            created_by,
            created_at,
        }
    }
}

/// Query parameters for listing events.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListEventsQuery {
    /// Only events whose date is in the future.
    #[serde(default)]
    pub upcoming: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(max_attendees: Option<i32>, registered_count: i64) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Site tour".to_string(),
            description: String::new(),
            event_date: Utc::now(),
            event_type: "networking".to_string(),
            location: "Downtown".to_string(),
            virtual_link: None,
            max_attendees,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            registered_count,
        }
    }

    #[test]
    fn test_capacity() {
        assert!(!event(None, 10_000).is_full());
        assert!(!event(Some(2), 1).is_full());
        assert!(event(Some(2), 2).is_full());
        assert_eq!(event(Some(5), 3).spots_remaining(), Some(2));
        assert_eq!(event(None, 3).spots_remaining(), None);
    }

    #[test]
    fn test_create_request_validation() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{"title":"Panel","event_date":"2030-01-15T18:00:00Z","event_type":"speaker","max_attendees":0}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());

        let req: CreateEventRequest = serde_json::from_str(
            r#"{"title":"Panel","event_date":"2030-01-15T18:00:00Z","event_type":"speaker","virtual_link":"https://meet.example.com/x"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.max_attendees, None);
    }
}
