//! User repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::{NewUser, Role, User};
use domain::repositories::UserRepository;
use domain::{DomainError, DomainResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RoleDb, UserEntity, UserStatusDb};
use crate::error::{db_error, is_unique_violation};
use crate::metrics::QueryTimer;

const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, phone, status, role, created_at, last_login_at";

/// PostgreSQL-backed user repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> DomainResult<User> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, phone, status, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(UserStatusDb::from(user.status))
        .bind(RoleDb::from(user.role))
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);

        match result {
            Ok(entity) => Ok(entity.into()),
            Err(e) if is_unique_violation(&e, "users_email_key") => Err(DomainError::DuplicateEmail),
            Err(e) => Err(db_error("create_user")(e)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("find_user_by_id"))?.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("find_user_by_email"))?.map(Into::into))
    }

    async fn list_by_role(&self, role: Role) -> DomainResult<Vec<User>> {
        let timer = QueryTimer::new("list_users_by_role");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at, id"
        ))
        .bind(RoleDb::from(role))
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result
            .map_err(db_error("list_users_by_role"))?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> DomainResult<()> {
        let timer = QueryTimer::new("record_user_login");
        let result = sqlx::query("UPDATE users SET last_login_at = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record_result(&result);

        result.map_err(db_error("record_user_login"))?;
        Ok(())
    }
}
