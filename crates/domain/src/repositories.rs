//! Storage interfaces used by the domain services.
//!
//! Implemented by the PostgreSQL repositories and by the in-memory store in
//! the persistence crate. Every method reports storage failures as
//! [`DomainError::Storage`](crate::DomainError::Storage).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::DomainResult;
use crate::models::{
    AccessLevel, ApplicationStatus, CollaborationOffer, CollaborationType, DashboardCounts, Event,
    EventRegistration, MatchingSnapshot, MemberApplication, MemberProfile, NewApplication,
    NewCollaborationOffer, NewEvent, NewResource, NewUser, ProfileUpsert, Resource, Role, User,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `DuplicateEmail` when the email is taken.
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Looks up by already-normalized email.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn list_by_role(&self, role: Role) -> DomainResult<Vec<User>>;

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> DomainResult<()>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Inserts a pending application unless one already exists for the user.
    ///
    /// Returns `None` when the user already has an application in any status.
    /// The existence check and the insert are atomic per user.
    async fn insert_if_absent(
        &self,
        application: NewApplication,
    ) -> DomainResult<Option<MemberApplication>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<MemberApplication>>;

    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<MemberApplication>>;

    /// Lists applications ordered by `submitted_at`, then id.
    async fn list(&self, status: Option<ApplicationStatus>)
        -> DomainResult<Vec<MemberApplication>>;

    /// Moves a pending application to `status`.
    ///
    /// Returns `None` when the application is missing or no longer pending,
    /// so at most one of several concurrent reviews succeeds.
    async fn review(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        reviewed_by: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> DomainResult<Option<MemberApplication>>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: NewEvent) -> DomainResult<Event>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Event>>;

    /// Lists events ordered by date; only those after `after` when given.
    async fn list(&self, after: Option<DateTime<Utc>>) -> DomainResult<Vec<Event>>;

    /// Records a registration as one atomic unit per event.
    ///
    /// Fails with `NotFound`, `AlreadyRegistered` or `CapacityExceeded`.
    async fn register(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        registered_at: DateTime<Utc>,
    ) -> DomainResult<EventRegistration>;

    async fn count_registrations(&self, event_id: Uuid) -> DomainResult<i64>;
}

#[async_trait]
pub trait CollaborationRepository: Send + Sync {
    /// Inserts the offer and sets the owner's profile specializations and
    /// LinkedIn URL as one write. A missing profile is created at the
    /// professional level. On error neither change is stored.
    async fn create_with_profile(
        &self,
        offer: NewCollaborationOffer,
        specializations: Vec<String>,
    ) -> DomainResult<CollaborationOffer>;

    /// Offers owned by the user, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> DomainResult<Vec<CollaborationOffer>>;

    /// Deactivates an offer owned by `owner_id`. `None` if no such offer.
    async fn deactivate(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> DomainResult<Option<CollaborationOffer>>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<MemberProfile>>;

    async fn upsert(
        &self,
        user_id: Uuid,
        profile: ProfileUpsert,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<MemberProfile>;
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn create(&self, resource: NewResource) -> DomainResult<Resource>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Resource>>;

    /// Resources with one of the given access levels, newest first.
    async fn list_visible(&self, levels: &[AccessLevel]) -> DomainResult<Vec<Resource>>;

    /// Increments the download counter. `None` if the resource is missing.
    async fn record_download(&self, id: Uuid) -> DomainResult<Option<Resource>>;
}

#[async_trait]
pub trait MatchingRepository: Send + Sync {
    /// Reads approved members, and active offers of `offer_type` with their
    /// owners' profiles, from one consistent point in time.
    async fn snapshot(
        &self,
        offer_type: Option<CollaborationType>,
    ) -> DomainResult<MatchingSnapshot>;
}

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn dashboard_counts(
        &self,
        now: DateTime<Utc>,
        growth_window_start: DateTime<Utc>,
    ) -> DomainResult<DashboardCounts>;
}

/// All repositories, built from one storage backend.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub events: Arc<dyn EventRepository>,
    pub collaborations: Arc<dyn CollaborationRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub resources: Arc<dyn ResourceRepository>,
    pub matching: Arc<dyn MatchingRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
}
