//! Resource entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{AccessLevel, Resource};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for access_level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "access_level", rename_all = "lowercase")]
pub enum AccessLevelDb {
    Public,
    Member,
    Admin,
}

impl From<AccessLevelDb> for AccessLevel {
    fn from(db: AccessLevelDb) -> Self {
        match db {
            AccessLevelDb::Public => Self::Public,
            AccessLevelDb::Member => Self::Member,
            AccessLevelDb::Admin => Self::Admin,
        }
    }
}

impl From<AccessLevel> for AccessLevelDb {
    fn from(level: AccessLevel) -> Self {
        match level {
            AccessLevel::Public => Self::Public,
            AccessLevel::Member => Self::Member,
            AccessLevel::Admin => Self::Admin,
        }
    }
}

/// Database row mapping for the resources table.
#[derive(Debug, Clone, FromRow)]
pub struct ResourceEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub resource_type: String,
    pub access_level: AccessLevelDb,
    pub tags: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub download_count: i64,
}

impl From<ResourceEntity> for Resource {
    fn from(entity: ResourceEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            file_url: entity.file_url,
            resource_type: entity.resource_type,
            access_level: entity.access_level.into(),
            tags: entity.tags,
            created_by: entity.created_by,
            created_at: entity.created_at,
            download_count: entity.download_count,
        }
    }
}
