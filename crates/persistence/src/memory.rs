//! In-memory storage backend.
//!
//! Implements every repository trait over a single `RwLock`. Each mutating
//! operation performs its checks and its write under one write guard, so the
//! per-user application check and the per-event capacity check are atomic.
//! Matcher snapshots are read under one read guard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::{
    AccessLevel, ApplicationStatus, ApprovedMember, CollaborationOffer, CollaborationType,
    DashboardCounts, Event, EventRegistration, ExperienceLevel, MatchingSnapshot, MemberApplication,
    MemberProfile, MemberSummary, NewApplication, NewCollaborationOffer, NewEvent, NewResource,
    NewUser, ProfileUpsert, Resource, Role, User,
};
use domain::repositories::{
    AnalyticsRepository, ApplicationRepository, CollaborationRepository, EventRepository,
    MatchingRepository, ProfileRepository, Repositories, ResourceRepository, UserRepository,
};
use domain::{DomainError, DomainResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Stored event row, without the derived registration count.
#[derive(Debug, Clone)]
struct EventRecord {
    id: Uuid,
    event: NewEvent,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    applications: Vec<MemberApplication>,
    offers: Vec<CollaborationOffer>,
    profiles: HashMap<Uuid, MemberProfile>,
    events: Vec<EventRecord>,
    registrations: Vec<EventRegistration>,
    resources: Vec<Resource>,
    #[cfg(test)]
    fail_profile_writes: bool,
}

impl MemoryState {
    fn registered_count(&self, event_id: Uuid) -> i64 {
        self.registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .count() as i64
    }

    /// Profile state after an offer submission, built before anything is stored.
    fn offer_profile(
        &self,
        offer: &NewCollaborationOffer,
        specializations: Vec<String>,
    ) -> DomainResult<MemberProfile> {
        #[cfg(test)]
        if self.fail_profile_writes {
            return Err(DomainError::Storage("profile write rejected".to_string()));
        }

        let profile = match self.profiles.get(&offer.user_id) {
            Some(existing) => MemberProfile {
                linkedin_url: offer.linkedin_url.clone(),
                specializations,
                updated_at: offer.created_at,
                ..existing.clone()
            },
            None => {
                let blank = ProfileUpsert::blank(ExperienceLevel::Professional);
                MemberProfile {
                    id: Uuid::new_v4(),
                    user_id: offer.user_id,
                    bio: blank.bio,
                    linkedin_url: offer.linkedin_url.clone(),
                    experience_level: blank.experience_level,
                    specializations,
                    portfolio_projects: blank.portfolio_projects,
                    is_public: blank.is_public,
                    updated_at: offer.created_at,
                }
            }
        };
        Ok(profile)
    }

    fn event_view(&self, record: &EventRecord) -> Event {
        Event {
            id: record.id,
            title: record.event.title.clone(),
            description: record.event.description.clone(),
            event_date: record.event.event_date,
            event_type: record.event.event_type.clone(),
            location: record.event.location.clone(),
            virtual_link: record.event.virtual_link.clone(),
            max_attendees: record.event.max_attendees,
            created_by: record.event.created_by,
            created_at: record.event.created_at,
            registered_count: self.registered_count(record.id),
        }
    }
}

/// Process-local store. Cloning shares the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the repository bundle backed by this store.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.clone()),
            applications: Arc::new(self.clone()),
            events: Arc::new(self.clone()),
            collaborations: Arc::new(self.clone()),
            profiles: Arc::new(self.clone()),
            resources: Arc::new(self.clone()),
            matching: Arc::new(self.clone()),
            analytics: Arc::new(self.clone()),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> DomainResult<User> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::DuplicateEmail);
        }

        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            status: user.status,
            role: user.role,
            created_at: Utc::now(),
            last_login_at: None,
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_by_role(&self, role: Role) -> DomainResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().filter(|u| u.role == role).cloned().collect())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> DomainResult<()> {
        let mut state = self.state.write().await;
        if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn insert_if_absent(
        &self,
        application: NewApplication,
    ) -> DomainResult<Option<MemberApplication>> {
        let mut state = self.state.write().await;
        if state
            .applications
            .iter()
            .any(|a| a.user_id == application.user_id)
        {
            return Ok(None);
        }

        let created = MemberApplication {
            id: Uuid::new_v4(),
            user_id: application.user_id,
            graduation_year: application.graduation_year,
            major: application.major,
            career_interests: application.career_interests,
            gpa: application.gpa,
            interest_reason: application.interest_reason,
            experience: application.experience,
            goals: application.goals,
            status: ApplicationStatus::Pending,
            submitted_at: application.submitted_at,
            reviewed_at: None,
            reviewed_by: None,
        };
        state.applications.push(created.clone());
        Ok(Some(created))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<MemberApplication>> {
        let state = self.state.read().await;
        Ok(state.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<MemberApplication>> {
        let state = self.state.read().await;
        Ok(state
            .applications
            .iter()
            .find(|a| a.user_id == user_id)
            .cloned())
    }

    async fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> DomainResult<Vec<MemberApplication>> {
        let state = self.state.read().await;
        let mut applications: Vec<MemberApplication> = state
            .applications
            .iter()
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        applications.sort_by(|a, b| (a.submitted_at, a.id).cmp(&(b.submitted_at, b.id)));
        Ok(applications)
    }

    async fn review(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        reviewed_by: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> DomainResult<Option<MemberApplication>> {
        let mut state = self.state.write().await;
        let Some(application) = state
            .applications
            .iter_mut()
            .find(|a| a.id == id && a.status == ApplicationStatus::Pending)
        else {
            return Ok(None);
        };

        application.status = status;
        application.reviewed_by = Some(reviewed_by);
        application.reviewed_at = Some(reviewed_at);
        Ok(Some(application.clone()))
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn create(&self, event: NewEvent) -> DomainResult<Event> {
        let mut state = self.state.write().await;
        let record = EventRecord {
            id: Uuid::new_v4(),
            event,
        };
        let view = state.event_view(&record);
        state.events.push(record);
        Ok(view)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Event>> {
        let state = self.state.read().await;
        Ok(state
            .events
            .iter()
            .find(|e| e.id == id)
            .map(|record| state.event_view(record)))
    }

    async fn list(&self, after: Option<DateTime<Utc>>) -> DomainResult<Vec<Event>> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .events
            .iter()
            .filter(|e| after.map_or(true, |t| e.event.event_date > t))
            .map(|record| state.event_view(record))
            .collect();
        events.sort_by(|a, b| (a.event_date, a.id).cmp(&(b.event_date, b.id)));
        Ok(events)
    }

    async fn register(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        registered_at: DateTime<Utc>,
    ) -> DomainResult<EventRegistration> {
        let mut state = self.state.write().await;

        let max_attendees = state
            .events
            .iter()
            .find(|e| e.id == event_id)
            .map(|e| e.event.max_attendees)
            .ok_or_else(|| DomainError::not_found("Event", event_id))?;

        if state
            .registrations
            .iter()
            .any(|r| r.event_id == event_id && r.user_id == user_id)
        {
            return Err(DomainError::AlreadyRegistered { event_id, user_id });
        }

        if let Some(max) = max_attendees {
            if state.registered_count(event_id) >= i64::from(max) {
                return Err(DomainError::CapacityExceeded {
                    event_id,
                    max_attendees: max,
                });
            }
        }

        let registration = EventRegistration {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            registered_at,
            attended: false,
        };
        state.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn count_registrations(&self, event_id: Uuid) -> DomainResult<i64> {
        let state = self.state.read().await;
        Ok(state.registered_count(event_id))
    }
}

#[async_trait]
impl CollaborationRepository for MemoryStore {
    async fn create_with_profile(
        &self,
        offer: NewCollaborationOffer,
        specializations: Vec<String>,
    ) -> DomainResult<CollaborationOffer> {
        let mut state = self.state.write().await;
        let profile = state.offer_profile(&offer, specializations)?;

        let created = CollaborationOffer {
            id: Uuid::new_v4(),
            user_id: offer.user_id,
            company: offer.company,
            position: offer.position,
            industry: offer.industry,
            collaboration_type: offer.collaboration_type,
            details: offer.details,
            linkedin_url: offer.linkedin_url,
            is_active: true,
            created_at: offer.created_at,
        };
        state.offers.push(created.clone());
        state.profiles.insert(created.user_id, profile);
        Ok(created)
    }

    async fn list_by_user(&self, user_id: Uuid) -> DomainResult<Vec<CollaborationOffer>> {
        let state = self.state.read().await;
        // insertion order is creation order
        Ok(state
            .offers
            .iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn deactivate(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> DomainResult<Option<CollaborationOffer>> {
        let mut state = self.state.write().await;
        Ok(state
            .offers
            .iter_mut()
            .find(|o| o.id == id && o.user_id == owner_id)
            .map(|offer| {
                offer.is_active = false;
                offer.clone()
            }))
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<MemberProfile>> {
        let state = self.state.read().await;
        Ok(state.profiles.get(&user_id).cloned())
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        profile: ProfileUpsert,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<MemberProfile> {
        let mut state = self.state.write().await;
        let id = state
            .profiles
            .get(&user_id)
            .map(|existing| existing.id)
            .unwrap_or_else(Uuid::new_v4);

        let stored = MemberProfile {
            id,
            user_id,
            bio: profile.bio,
            linkedin_url: profile.linkedin_url,
            experience_level: profile.experience_level,
            specializations: profile.specializations,
            portfolio_projects: profile.portfolio_projects,
            is_public: profile.is_public,
            updated_at,
        };
        state.profiles.insert(user_id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ResourceRepository for MemoryStore {
    async fn create(&self, resource: NewResource) -> DomainResult<Resource> {
        let mut state = self.state.write().await;
        let created = Resource {
            id: Uuid::new_v4(),
            title: resource.title,
            description: resource.description,
            file_url: resource.file_url,
            resource_type: resource.resource_type,
            access_level: resource.access_level,
            tags: resource.tags,
            created_by: resource.created_by,
            created_at: resource.created_at,
            download_count: 0,
        };
        state.resources.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Resource>> {
        let state = self.state.read().await;
        Ok(state.resources.iter().find(|r| r.id == id).cloned())
    }

    async fn list_visible(&self, levels: &[AccessLevel]) -> DomainResult<Vec<Resource>> {
        let state = self.state.read().await;
        let mut resources: Vec<Resource> = state
            .resources
            .iter()
            .filter(|r| levels.contains(&r.access_level))
            .cloned()
            .collect();
        resources.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(resources)
    }

    async fn record_download(&self, id: Uuid) -> DomainResult<Option<Resource>> {
        let mut state = self.state.write().await;
        Ok(state
            .resources
            .iter_mut()
            .find(|r| r.id == id)
            .map(|resource| {
                resource.download_count += 1;
                resource.clone()
            }))
    }
}

#[async_trait]
impl MatchingRepository for MemoryStore {
    async fn snapshot(
        &self,
        offer_type: Option<CollaborationType>,
    ) -> DomainResult<MatchingSnapshot> {
        let state = self.state.read().await;

        let mut approved: Vec<&MemberApplication> = state
            .applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::Approved)
            .collect();
        approved.sort_by(|a, b| (a.submitted_at, a.id).cmp(&(b.submitted_at, b.id)));

        let members = approved
            .into_iter()
            .filter_map(|application| {
                let user = state.users.iter().find(|u| u.id == application.user_id)?;
                Some(ApprovedMember {
                    user: MemberSummary::from(user),
                    application: application.clone(),
                    profile: state.profiles.get(&application.user_id).cloned(),
                })
            })
            .collect();

        let mut offers: Vec<CollaborationOffer> = match offer_type {
            Some(kind) => state
                .offers
                .iter()
                .filter(|o| o.is_active && o.collaboration_type == kind)
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        offers.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let alumni_profiles = offers
            .iter()
            .filter_map(|o| {
                state
                    .profiles
                    .get(&o.user_id)
                    .map(|p| (o.user_id, p.clone()))
            })
            .collect();

        Ok(MatchingSnapshot {
            members,
            offers,
            alumni_profiles,
        })
    }
}

#[async_trait]
impl AnalyticsRepository for MemoryStore {
    async fn dashboard_counts(
        &self,
        now: DateTime<Utc>,
        growth_window_start: DateTime<Utc>,
    ) -> DomainResult<DashboardCounts> {
        let state = self.state.read().await;
        let count_status = |status: ApplicationStatus| {
            state
                .applications
                .iter()
                .filter(|a| a.status == status)
                .count() as i64
        };

        Ok(DashboardCounts {
            total_members: count_status(ApplicationStatus::Approved),
            pending_applications: count_status(ApplicationStatus::Pending),
            total_alumni: state.offers.iter().filter(|o| o.is_active).count() as i64,
            upcoming_events: state
                .events
                .iter()
                .filter(|e| e.event.event_date > now)
                .count() as i64,
            new_members_30d: state
                .applications
                .iter()
                .filter(|a| {
                    a.status == ApplicationStatus::Approved && a.submitted_at > growth_window_start
                })
                .count() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::models::UserStatus;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
            status: UserStatus::Active,
            role,
        }
    }

    fn new_event(max_attendees: Option<i32>, days_from_now: i64) -> NewEvent {
        NewEvent {
            title: "Networking night".to_string(),
            description: String::new(),
            event_date: Utc::now() + Duration::days(days_from_now),
            event_type: "networking".to_string(),
            location: "Campus".to_string(),
            virtual_link: None,
            max_attendees,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        UserRepository::create(&store, new_user("a@trea.edu", Role::Member))
            .await
            .unwrap();

        let result = UserRepository::create(&store, new_user("a@trea.edu", Role::Alumni)).await;
        assert!(matches!(result, Err(DomainError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_checks() {
        let store = MemoryStore::new();
        let event = EventRepository::create(&store, new_event(Some(1), 7))
            .await
            .unwrap();
        let first = Uuid::new_v4();

        store.register(event.id, first, Utc::now()).await.unwrap();

        let duplicate = store.register(event.id, first, Utc::now()).await;
        assert!(matches!(
            duplicate,
            Err(DomainError::AlreadyRegistered { .. })
        ));

        let full = store.register(event.id, Uuid::new_v4(), Utc::now()).await;
        assert!(matches!(full, Err(DomainError::CapacityExceeded { .. })));

        let missing = store.register(Uuid::new_v4(), first, Utc::now()).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));

        assert_eq!(store.count_registrations(event.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_event_list_filters_upcoming() {
        let store = MemoryStore::new();
        EventRepository::create(&store, new_event(None, -3))
            .await
            .unwrap();
        let upcoming = EventRepository::create(&store, new_event(None, 3))
            .await
            .unwrap();

        let all = EventRepository::list(&store, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let future = EventRepository::list(&store, Some(Utc::now())).await.unwrap();
        assert_eq!(future.len(), 1);
        assert_eq!(future[0].id, upcoming.id);
    }

    fn new_offer(owner: Uuid) -> NewCollaborationOffer {
        NewCollaborationOffer {
            user_id: owner,
            company: "CBRE".to_string(),
            position: "Analyst".to_string(),
            industry: "Brokerage".to_string(),
            collaboration_type: CollaborationType::Speaking,
            details: "Guest lecture".to_string(),
            linkedin_url: Some("https://linkedin.com/in/analyst".to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_deactivate_requires_owner() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let offer = store
            .create_with_profile(new_offer(owner), vec!["Brokerage".to_string()])
            .await
            .unwrap();

        assert!(store
            .deactivate(offer.id, Uuid::new_v4())
            .await
            .unwrap()
            .is_none());

        let deactivated = store.deactivate(offer.id, owner).await.unwrap().unwrap();
        assert!(!deactivated.is_active);
    }

    #[tokio::test]
    async fn test_offer_updates_existing_profile_fields_only() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let mut upsert = ProfileUpsert::blank(ExperienceLevel::Alumni);
        upsert.bio = Some("Twenty years in office leasing".to_string());
        upsert.is_public = false;
        let before = store.upsert(owner, upsert, Utc::now()).await.unwrap();

        store
            .create_with_profile(new_offer(owner), vec!["Leasing".to_string()])
            .await
            .unwrap();

        let after = ProfileRepository::find_by_user(&store, owner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.specializations, vec!["Leasing".to_string()]);
        assert_eq!(
            after.linkedin_url.as_deref(),
            Some("https://linkedin.com/in/analyst")
        );
        assert_eq!(after.bio, before.bio);
        assert_eq!(after.experience_level, ExperienceLevel::Alumni);
        assert!(!after.is_public);
    }

    #[tokio::test]
    async fn test_rejected_profile_write_stores_no_offer() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        store.state.write().await.fail_profile_writes = true;

        let result = store
            .create_with_profile(new_offer(owner), vec!["Brokerage".to_string()])
            .await;

        assert!(matches!(result, Err(DomainError::Storage(_))));
        assert!(store.list_by_user(owner).await.unwrap().is_empty());
        assert!(ProfileRepository::find_by_user(&store, owner)
            .await
            .unwrap()
            .is_none());
        let counts = store
            .dashboard_counts(Utc::now(), Utc::now() - Duration::days(30))
            .await
            .unwrap();
        assert_eq!(counts.total_alumni, 0);
    }
}
