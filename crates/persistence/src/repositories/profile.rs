//! Member profile repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::{MemberProfile, ProfileUpsert};
use domain::repositories::ProfileRepository;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ExperienceLevelDb, ProfileEntity};
use crate::error::db_error;
use crate::metrics::QueryTimer;

pub(crate) const PROFILE_COLUMNS: &str = "id, user_id, bio, linkedin_url, experience_level, specializations, portfolio_projects, is_public, updated_at";

/// PostgreSQL-backed profile repository.
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<MemberProfile>> {
        let timer = QueryTimer::new("find_profile_by_user");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM member_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("find_profile_by_user"))?.map(Into::into))
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        profile: ProfileUpsert,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<MemberProfile> {
        let timer = QueryTimer::new("upsert_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            INSERT INTO member_profiles
                (user_id, bio, linkedin_url, experience_level, specializations, portfolio_projects, is_public, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                bio = EXCLUDED.bio,
                linkedin_url = EXCLUDED.linkedin_url,
                experience_level = EXCLUDED.experience_level,
                specializations = EXCLUDED.specializations,
                portfolio_projects = EXCLUDED.portfolio_projects,
                is_public = EXCLUDED.is_public,
                updated_at = EXCLUDED.updated_at
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&profile.bio)
        .bind(&profile.linkedin_url)
        .bind(ExperienceLevelDb::from(profile.experience_level))
        .bind(&profile.specializations)
        .bind(&profile.portfolio_projects)
        .bind(profile.is_public)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("upsert_profile"))?.into())
    }
}
