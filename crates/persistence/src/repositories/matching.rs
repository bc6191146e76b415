//! Snapshot reads for the interest matcher.

use async_trait::async_trait;
use domain::models::{
    ApprovedMember, CollaborationOffer, CollaborationType, MatchingSnapshot, MemberProfile,
    MemberSummary,
};
use domain::repositories::MatchingRepository;
use domain::DomainResult;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::{
    ApprovedMemberEntity, CollaborationOfferEntity, CollaborationTypeDb, ProfileEntity,
};
use crate::error::db_error;
use crate::metrics::QueryTimer;
use crate::repositories::collaboration::OFFER_COLUMNS;
use crate::repositories::profile::PROFILE_COLUMNS;

/// PostgreSQL-backed matcher snapshot reader.
#[derive(Clone)]
pub struct PgMatchingRepository {
    pool: PgPool,
}

impl PgMatchingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchingRepository for PgMatchingRepository {
    async fn snapshot(
        &self,
        offer_type: Option<CollaborationType>,
    ) -> DomainResult<MatchingSnapshot> {
        let timer = QueryTimer::new("matching_snapshot");
        let err = || db_error("matching_snapshot");

        let mut tx = self.pool.begin().await.map_err(err())?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(err())?;

        let approved = sqlx::query_as::<_, ApprovedMemberEntity>(
            r#"
            SELECT a.id, a.user_id, a.graduation_year, a.major, a.career_interests, a.gpa,
                   a.interest_reason, a.experience, a.goals, a.status, a.submitted_at,
                   a.reviewed_at, a.reviewed_by,
                   u.email, u.first_name, u.last_name
            FROM member_applications a
            JOIN users u ON u.id = a.user_id
            WHERE a.status = 'approved'
            ORDER BY a.submitted_at, a.id
            "#,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(err())?;

        let member_ids: Vec<Uuid> = approved.iter().map(|m| m.application.user_id).collect();
        let mut member_profiles = load_profiles(&mut tx, &member_ids).await.map_err(err())?;

        let (offers, alumni_profiles) = match offer_type {
            Some(kind) => {
                let offers: Vec<CollaborationOffer> =
                    sqlx::query_as::<_, CollaborationOfferEntity>(&format!(
                        r#"
                        SELECT {OFFER_COLUMNS}
                        FROM collaboration_offers
                        WHERE collaboration_type = $1 AND is_active
                        ORDER BY created_at, id
                        "#
                    ))
                    .bind(CollaborationTypeDb::from(kind))
                    .fetch_all(&mut *tx)
                    .await
                    .map_err(err())?
                    .into_iter()
                    .map(Into::into)
                    .collect();

                let owner_ids: Vec<Uuid> = offers.iter().map(|o| o.user_id).collect();
                let profiles = load_profiles(&mut tx, &owner_ids).await.map_err(err())?;
                (offers, profiles)
            }
            None => (Vec::new(), HashMap::new()),
        };

        tx.commit().await.map_err(err())?;
        timer.record();

        let members = approved
            .into_iter()
            .map(|row| ApprovedMember {
                user: MemberSummary {
                    id: row.application.user_id,
                    email: row.email,
                    first_name: row.first_name,
                    last_name: row.last_name,
                },
                profile: member_profiles.remove(&row.application.user_id),
                application: row.application.into(),
            })
            .collect();

        Ok(MatchingSnapshot {
            members,
            offers,
            alumni_profiles,
        })
    }
}

async fn load_profiles(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, MemberProfile>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, ProfileEntity>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM member_profiles WHERE user_id = ANY($1)"
    ))
    .bind(user_ids)
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.user_id, MemberProfile::from(row)))
        .collect())
}
