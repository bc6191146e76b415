//! Collaboration offer repository for database operations.

use async_trait::async_trait;
use domain::models::{CollaborationOffer, ExperienceLevel, NewCollaborationOffer};
use domain::repositories::CollaborationRepository;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{CollaborationOfferEntity, CollaborationTypeDb, ExperienceLevelDb};
use crate::error::db_error;
use crate::metrics::QueryTimer;

pub(crate) const OFFER_COLUMNS: &str = "id, user_id, company, position, industry, collaboration_type, details, linkedin_url, is_active, created_at";

/// PostgreSQL-backed collaboration offer repository.
#[derive(Clone)]
pub struct PgCollaborationRepository {
    pool: PgPool,
}

impl PgCollaborationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollaborationRepository for PgCollaborationRepository {
    async fn create_with_profile(
        &self,
        offer: NewCollaborationOffer,
        specializations: Vec<String>,
    ) -> DomainResult<CollaborationOffer> {
        let timer = QueryTimer::new("create_collaboration_offer");
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("create_collaboration_offer"))?;

        let created = sqlx::query_as::<_, CollaborationOfferEntity>(&format!(
            r#"
            INSERT INTO collaboration_offers
                (user_id, company, position, industry, collaboration_type, details, linkedin_url, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8)
            RETURNING {OFFER_COLUMNS}
            "#
        ))
        .bind(offer.user_id)
        .bind(&offer.company)
        .bind(&offer.position)
        .bind(&offer.industry)
        .bind(CollaborationTypeDb::from(offer.collaboration_type))
        .bind(&offer.details)
        .bind(&offer.linkedin_url)
        .bind(offer.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("create_collaboration_offer"))?;

        // Existing profiles keep bio, level, portfolio and visibility.
        sqlx::query(
            r#"
            INSERT INTO member_profiles
                (user_id, linkedin_url, experience_level, specializations, portfolio_projects, is_public, updated_at)
            VALUES ($1, $2, $3, $4, '{}', TRUE, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                linkedin_url = EXCLUDED.linkedin_url,
                specializations = EXCLUDED.specializations,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(offer.user_id)
        .bind(&offer.linkedin_url)
        .bind(ExperienceLevelDb::from(ExperienceLevel::Professional))
        .bind(&specializations)
        .bind(offer.created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("create_collaboration_offer"))?;

        let committed = tx.commit().await;
        timer.record_result(&committed);
        committed.map_err(db_error("create_collaboration_offer"))?;

        Ok(created.into())
    }

    async fn list_by_user(&self, user_id: Uuid) -> DomainResult<Vec<CollaborationOffer>> {
        let timer = QueryTimer::new("list_collaboration_offers_by_user");
        let result = sqlx::query_as::<_, CollaborationOfferEntity>(&format!(
            "SELECT {OFFER_COLUMNS} FROM collaboration_offers WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result
            .map_err(db_error("list_collaboration_offers_by_user"))?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn deactivate(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> DomainResult<Option<CollaborationOffer>> {
        let timer = QueryTimer::new("deactivate_collaboration_offer");
        let result = sqlx::query_as::<_, CollaborationOfferEntity>(&format!(
            r#"
            UPDATE collaboration_offers
            SET is_active = FALSE
            WHERE id = $1 AND user_id = $2
            RETURNING {OFFER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result
            .map_err(db_error("deactivate_collaboration_offer"))?
            .map(Into::into))
    }
}
