//! Aggregate counts for the admin dashboard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::DashboardCounts;
use domain::repositories::AnalyticsRepository;
use domain::DomainResult;
use sqlx::{FromRow, PgPool};

use crate::error::db_error;
use crate::metrics::QueryTimer;

#[derive(Debug, FromRow)]
struct DashboardCountsRow {
    total_members: i64,
    pending_applications: i64,
    total_alumni: i64,
    upcoming_events: i64,
    new_members_30d: i64,
}

/// PostgreSQL-backed analytics repository.
#[derive(Clone)]
pub struct PgAnalyticsRepository {
    pool: PgPool,
}

impl PgAnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn dashboard_counts(
        &self,
        now: DateTime<Utc>,
        growth_window_start: DateTime<Utc>,
    ) -> DomainResult<DashboardCounts> {
        let timer = QueryTimer::new("dashboard_counts");
        let result = sqlx::query_as::<_, DashboardCountsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM member_applications WHERE status = 'approved') AS total_members,
                (SELECT COUNT(*) FROM member_applications WHERE status = 'pending') AS pending_applications,
                (SELECT COUNT(*) FROM collaboration_offers WHERE is_active) AS total_alumni,
                (SELECT COUNT(*) FROM events WHERE event_date > $1) AS upcoming_events,
                (SELECT COUNT(*) FROM member_applications
                    WHERE status = 'approved' AND submitted_at > $2) AS new_members_30d
            "#,
        )
        .bind(now)
        .bind(growth_window_start)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);

        let row = result.map_err(db_error("dashboard_counts"))?;
        Ok(DashboardCounts {
            total_members: row.total_members,
            pending_applications: row.pending_applications,
            total_alumni: row.total_alumni,
            upcoming_events: row.upcoming_events,
            new_members_30d: row.new_members_30d,
        })
    }
}
