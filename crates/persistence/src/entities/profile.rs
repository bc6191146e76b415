//! Member profile entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{ExperienceLevel, MemberProfile};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for experience_level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "experience_level", rename_all = "lowercase")]
pub enum ExperienceLevelDb {
    Student,
    Alumni,
    Professional,
}

impl From<ExperienceLevelDb> for ExperienceLevel {
    fn from(db: ExperienceLevelDb) -> Self {
        match db {
            ExperienceLevelDb::Student => Self::Student,
            ExperienceLevelDb::Alumni => Self::Alumni,
            ExperienceLevelDb::Professional => Self::Professional,
        }
    }
}

impl From<ExperienceLevel> for ExperienceLevelDb {
    fn from(level: ExperienceLevel) -> Self {
        match level {
            ExperienceLevel::Student => Self::Student,
            ExperienceLevel::Alumni => Self::Alumni,
            ExperienceLevel::Professional => Self::Professional,
        }
    }
}

/// Database row mapping for the member_profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub experience_level: ExperienceLevelDb,
    pub specializations: Vec<String>,
    pub portfolio_projects: Vec<String>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileEntity> for MemberProfile {
    fn from(entity: ProfileEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            bio: entity.bio,
            linkedin_url: entity.linkedin_url,
            experience_level: entity.experience_level.into(),
            specializations: entity.specializations,
            portfolio_projects: entity.portfolio_projects,
            is_public: entity.is_public,
            updated_at: entity.updated_at,
        }
    }
}
