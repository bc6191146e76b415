//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Role, User, UserStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for user_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
pub enum UserStatusDb {
    Active,
    Inactive,
    Pending,
}

impl From<UserStatusDb> for UserStatus {
    fn from(db: UserStatusDb) -> Self {
        match db {
            UserStatusDb::Active => Self::Active,
            UserStatusDb::Inactive => Self::Inactive,
            UserStatusDb::Pending => Self::Pending,
        }
    }
}

impl From<UserStatus> for UserStatusDb {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Active => Self::Active,
            UserStatus::Inactive => Self::Inactive,
            UserStatus::Pending => Self::Pending,
        }
    }
}

/// Database enum for user_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum RoleDb {
    Admin,
    Member,
    Alumni,
}

impl From<RoleDb> for Role {
    fn from(db: RoleDb) -> Self {
        match db {
            RoleDb::Admin => Self::Admin,
            RoleDb::Member => Self::Member,
            RoleDb::Alumni => Self::Alumni,
        }
    }
}

impl From<Role> for RoleDb {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Member => Self::Member,
            Role::Alumni => Self::Alumni,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub status: UserStatusDb,
    pub role: RoleDb,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone: entity.phone,
            status: entity.status.into(),
            role: entity.role.into(),
            created_at: entity.created_at,
            last_login_at: entity.last_login_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping_round_trip() {
        for role in [Role::Admin, Role::Member, Role::Alumni] {
            assert_eq!(Role::from(RoleDb::from(role)), role);
        }
    }

    #[test]
    fn test_status_mapping_round_trip() {
        for status in [UserStatus::Active, UserStatus::Inactive, UserStatus::Pending] {
            assert_eq!(UserStatus::from(UserStatusDb::from(status)), status);
        }
    }
}
