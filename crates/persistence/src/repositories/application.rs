//! Member application repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::{ApplicationStatus, MemberApplication, NewApplication};
use domain::repositories::ApplicationRepository;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ApplicationEntity, ApplicationStatusDb};
use crate::error::db_error;
use crate::metrics::QueryTimer;

pub(crate) const APPLICATION_COLUMNS: &str = "id, user_id, graduation_year, major, career_interests, gpa, interest_reason, experience, goals, status, submitted_at, reviewed_at, reviewed_by";

/// PostgreSQL-backed application repository.
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn insert_if_absent(
        &self,
        application: NewApplication,
    ) -> DomainResult<Option<MemberApplication>> {
        // UNIQUE(user_id) makes the check and the insert one statement.
        let timer = QueryTimer::new("insert_application");
        let result = sqlx::query_as::<_, ApplicationEntity>(&format!(
            r#"
            INSERT INTO member_applications
                (user_id, graduation_year, major, career_interests, gpa, interest_reason, experience, goals, status, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application.user_id)
        .bind(application.graduation_year)
        .bind(&application.major)
        .bind(&application.career_interests)
        .bind(application.gpa)
        .bind(&application.interest_reason)
        .bind(&application.experience)
        .bind(&application.goals)
        .bind(application.submitted_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("insert_application"))?.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<MemberApplication>> {
        let timer = QueryTimer::new("find_application_by_id");
        let result = sqlx::query_as::<_, ApplicationEntity>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM member_applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("find_application_by_id"))?.map(Into::into))
    }

    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<MemberApplication>> {
        let timer = QueryTimer::new("find_application_by_user");
        let result = sqlx::query_as::<_, ApplicationEntity>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM member_applications WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("find_application_by_user"))?.map(Into::into))
    }

    async fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> DomainResult<Vec<MemberApplication>> {
        let timer = QueryTimer::new("list_applications");
        let result = sqlx::query_as::<_, ApplicationEntity>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM member_applications
            WHERE ($1::application_status IS NULL OR status = $1)
            ORDER BY submitted_at, id
            "#
        ))
        .bind(status.map(ApplicationStatusDb::from))
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result
            .map_err(db_error("list_applications"))?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn review(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        reviewed_by: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> DomainResult<Option<MemberApplication>> {
        let timer = QueryTimer::new("review_application");
        let result = sqlx::query_as::<_, ApplicationEntity>(&format!(
            r#"
            UPDATE member_applications
            SET status = $2, reviewed_by = $3, reviewed_at = $4
            WHERE id = $1 AND status = 'pending'
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(ApplicationStatusDb::from(status))
        .bind(reviewed_by)
        .bind(reviewed_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("review_application"))?.map(Into::into))
    }
}
