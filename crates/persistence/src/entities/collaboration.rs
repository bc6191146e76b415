//! Collaboration offer entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{CollaborationOffer, CollaborationType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for collaboration_type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "collaboration_type", rename_all = "lowercase")]
pub enum CollaborationTypeDb {
    Mentorship,
    Speaking,
    Funding,
    Consulting,
}

impl From<CollaborationTypeDb> for CollaborationType {
    fn from(db: CollaborationTypeDb) -> Self {
        match db {
            CollaborationTypeDb::Mentorship => Self::Mentorship,
            CollaborationTypeDb::Speaking => Self::Speaking,
            CollaborationTypeDb::Funding => Self::Funding,
            CollaborationTypeDb::Consulting => Self::Consulting,
        }
    }
}

impl From<CollaborationType> for CollaborationTypeDb {
    fn from(kind: CollaborationType) -> Self {
        match kind {
            CollaborationType::Mentorship => Self::Mentorship,
            CollaborationType::Speaking => Self::Speaking,
            CollaborationType::Funding => Self::Funding,
            CollaborationType::Consulting => Self::Consulting,
        }
    }
}

/// Database row mapping for the collaboration_offers table.
#[derive(Debug, Clone, FromRow)]
pub struct CollaborationOfferEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub position: String,
    pub industry: String,
    pub collaboration_type: CollaborationTypeDb,
    pub details: String,
    pub linkedin_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CollaborationOfferEntity> for CollaborationOffer {
    fn from(entity: CollaborationOfferEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            company: entity.company,
            position: entity.position,
            industry: entity.industry,
            collaboration_type: entity.collaboration_type.into(),
            details: entity.details,
            linkedin_url: entity.linkedin_url,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
