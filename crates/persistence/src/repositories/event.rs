//! Event repository and registration ledger for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::{Event, EventRegistration, NewEvent};
use domain::repositories::EventRepository;
use domain::{DomainError, DomainResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{EventEntity, EventRegistrationEntity};
use crate::error::{db_error, is_unique_violation};
use crate::metrics::QueryTimer;

const EVENT_SELECT: &str = r#"
    SELECT e.id, e.title, e.description, e.event_date, e.event_type, e.location,
           e.virtual_link, e.max_attendees, e.created_by, e.created_at,
           (SELECT COUNT(*) FROM event_registrations r WHERE r.event_id = e.id) AS registered_count
    FROM events e
"#;

/// PostgreSQL-backed event repository.
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, event: NewEvent) -> DomainResult<Event> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events
                (title, description, event_date, event_type, location, virtual_link, max_attendees, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, event_date, event_type, location,
                      virtual_link, max_attendees, created_by, created_at,
                      0::BIGINT AS registered_count
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.event_type)
        .bind(&event.location)
        .bind(&event.virtual_link)
        .bind(event.max_attendees)
        .bind(event.created_by)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("create_event"))?.into())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Event>> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(&format!("{EVENT_SELECT} WHERE e.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("find_event_by_id"))?.map(Into::into))
    }

    async fn list(&self, after: Option<DateTime<Utc>>) -> DomainResult<Vec<Event>> {
        let timer = QueryTimer::new("list_events");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "{EVENT_SELECT} WHERE ($1::TIMESTAMPTZ IS NULL OR e.event_date > $1) ORDER BY e.event_date, e.id"
        ))
        .bind(after)
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result
            .map_err(db_error("list_events"))?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn register(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        registered_at: DateTime<Utc>,
    ) -> DomainResult<EventRegistration> {
        let timer = QueryTimer::new("register_for_event");
        let mut tx = self.pool.begin().await.map_err(db_error("register_for_event"))?;

        // Row lock serializes registrations for this event until commit.
        let max_attendees: Option<Option<i32>> = sqlx::query_scalar(
            "SELECT max_attendees FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("register_for_event"))?;

        let Some(max_attendees) = max_attendees else {
            timer.record();
            return Err(DomainError::not_found("Event", event_id));
        };

        let already_registered: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM event_registrations WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("register_for_event"))?;

        if already_registered {
            timer.record();
            return Err(DomainError::AlreadyRegistered { event_id, user_id });
        }

        if let Some(max) = max_attendees {
            let count: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM event_registrations WHERE event_id = $1",
            )
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("register_for_event"))?;

            if count >= i64::from(max) {
                timer.record();
                return Err(DomainError::CapacityExceeded {
                    event_id,
                    max_attendees: max,
                });
            }
        }

        let inserted = sqlx::query_as::<_, EventRegistrationEntity>(
            r#"
            INSERT INTO event_registrations (event_id, user_id, registered_at, attended)
            VALUES ($1, $2, $3, FALSE)
            RETURNING id, event_id, user_id, registered_at, attended
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(registered_at)
        .fetch_one(&mut *tx)
        .await;

        let registration = match inserted {
            Ok(entity) => entity,
            Err(e) if is_unique_violation(&e, "event_registrations_event_user_unique") => {
                timer.record();
                return Err(DomainError::AlreadyRegistered { event_id, user_id });
            }
            Err(e) => return Err(db_error("register_for_event")(e)),
        };

        let committed = tx.commit().await;
        timer.record_result(&committed);
        committed.map_err(db_error("register_for_event"))?;

        Ok(registration.into())
    }

    async fn count_registrations(&self, event_id: Uuid) -> DomainResult<i64> {
        let timer = QueryTimer::new("count_event_registrations");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM event_registrations WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);

        result.map_err(db_error("count_event_registrations"))
    }
}
