//! Resource repository for database operations.

use async_trait::async_trait;
use domain::models::{AccessLevel, NewResource, Resource};
use domain::repositories::ResourceRepository;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AccessLevelDb, ResourceEntity};
use crate::error::db_error;
use crate::metrics::QueryTimer;

const RESOURCE_COLUMNS: &str = "id, title, description, file_url, resource_type, access_level, tags, created_by, created_at, download_count";

/// PostgreSQL-backed resource repository.
#[derive(Clone)]
pub struct PgResourceRepository {
    pool: PgPool,
}

impl PgResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for PgResourceRepository {
    async fn create(&self, resource: NewResource) -> DomainResult<Resource> {
        let timer = QueryTimer::new("create_resource");
        let result = sqlx::query_as::<_, ResourceEntity>(&format!(
            r#"
            INSERT INTO resources
                (title, description, file_url, resource_type, access_level, tags, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {RESOURCE_COLUMNS}
            "#
        ))
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.file_url)
        .bind(&resource.resource_type)
        .bind(AccessLevelDb::from(resource.access_level))
        .bind(&resource.tags)
        .bind(resource.created_by)
        .bind(resource.created_at)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("create_resource"))?.into())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Resource>> {
        let timer = QueryTimer::new("find_resource_by_id");
        let result = sqlx::query_as::<_, ResourceEntity>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result.map_err(db_error("find_resource_by_id"))?.map(Into::into))
    }

    async fn list_visible(&self, levels: &[AccessLevel]) -> DomainResult<Vec<Resource>> {
        let levels: Vec<String> = levels.iter().map(|l| l.as_str().to_string()).collect();

        let timer = QueryTimer::new("list_visible_resources");
        let result = sqlx::query_as::<_, ResourceEntity>(&format!(
            r#"
            SELECT {RESOURCE_COLUMNS}
            FROM resources
            WHERE access_level::TEXT = ANY($1)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(&levels)
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result
            .map_err(db_error("list_visible_resources"))?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn record_download(&self, id: Uuid) -> DomainResult<Option<Resource>> {
        let timer = QueryTimer::new("record_resource_download");
        let result = sqlx::query_as::<_, ResourceEntity>(&format!(
            r#"
            UPDATE resources
            SET download_count = download_count + 1
            WHERE id = $1
            RETURNING {RESOURCE_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);

        Ok(result
            .map_err(db_error("record_resource_download"))?
            .map(Into::into))
    }
}
