//! PostgreSQL repository implementations.

pub mod analytics;
pub mod application;
pub mod collaboration;
pub mod event;
pub mod matching;
pub mod profile;
pub mod resource;
pub mod user;

use std::sync::Arc;

use domain::repositories::Repositories;
use sqlx::PgPool;

pub use analytics::PgAnalyticsRepository;
pub use application::PgApplicationRepository;
pub use collaboration::PgCollaborationRepository;
pub use event::PgEventRepository;
pub use matching::PgMatchingRepository;
pub use profile::PgProfileRepository;
pub use resource::PgResourceRepository;
pub use user::PgUserRepository;

/// Builds the repository bundle over one connection pool.
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        applications: Arc::new(PgApplicationRepository::new(pool.clone())),
        events: Arc::new(PgEventRepository::new(pool.clone())),
        collaborations: Arc::new(PgCollaborationRepository::new(pool.clone())),
        profiles: Arc::new(PgProfileRepository::new(pool.clone())),
        resources: Arc::new(PgResourceRepository::new(pool.clone())),
        matching: Arc::new(PgMatchingRepository::new(pool.clone())),
        analytics: Arc::new(PgAnalyticsRepository::new(pool)),
    }
}
