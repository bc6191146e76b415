//! Service-level tests running the domain services over the memory store.

use chrono::{Duration, Utc};
use domain::models::{
    AccessLevel, Actor, ApplicationStatus, CollaborationType, CreateEventRequest,
    CreateResourceRequest, NewUser, ReviewDecision, Role, SubmitApplicationRequest,
    SubmitCollaborationRequest, User, UserStatus,
};
use domain::repositories::Repositories;
use domain::services::{MockNotificationService, NotificationService, Services};
use domain::DomainError;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use persistence::MemoryStore;
use std::sync::Arc;
use uuid::Uuid;

struct Harness {
    repos: Repositories,
    services: Services,
    notifier: Arc<MockNotificationService>,
}

fn harness_with(notifier: MockNotificationService) -> Harness {
    let repos = MemoryStore::new().repositories();
    let notifier = Arc::new(notifier);
    let services = Services::new(&repos, notifier.clone() as Arc<dyn NotificationService>);
    Harness {
        repos,
        services,
        notifier,
    }
}

fn harness() -> Harness {
    harness_with(MockNotificationService::new())
}

impl Harness {
    async fn user(&self, role: Role) -> (User, Actor) {
        let user = self
            .repos
            .users
            .create(NewUser {
                email: format!("{}@trea.test", Uuid::new_v4()),
                password_hash: "hash".to_string(),
                first_name: FirstName().fake(),
                last_name: LastName().fake(),
                phone: None,
                status: UserStatus::Active,
                role,
            })
            .await
            .unwrap();
        let actor = Actor::new(user.id, role);
        (user, actor)
    }

    async fn event(&self, admin: &Actor, max_attendees: Option<i32>) -> Uuid {
        self.services
            .events
            .create(
                admin,
                CreateEventRequest {
                    title: "Site tour".to_string(),
                    description: "Downtown development walk".to_string(),
                    event_date: Utc::now() + Duration::days(14),
                    event_type: "tour".to_string(),
                    location: "Downtown".to_string(),
                    virtual_link: None,
                    max_attendees,
                },
            )
            .await
            .unwrap()
            .id
    }
}

fn application(interests: &[&str]) -> SubmitApplicationRequest {
    SubmitApplicationRequest {
        graduation_year: 2026,
        major: "Finance".to_string(),
        career_interests: interests.iter().map(|s| s.to_string()).collect(),
        gpa: Some(3.6),
        interest_reason: "Real estate private equity".to_string(),
        experience: None,
        goals: "Acquisitions analyst".to_string(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_respect_capacity() {
    let h = harness();
    let (_, admin) = h.user(Role::Admin).await;
    let event_id = h.event(&admin, Some(1)).await;
    let (_, first) = h.user(Role::Member).await;
    let (_, second) = h.user(Role::Member).await;

    let handles: Vec<_> = [first, second]
        .into_iter()
        .map(|actor| {
            let events = h.services.events.clone();
            tokio::spawn(async move { events.register(&actor, event_id).await })
        })
        .collect();

    let mut successes = 0;
    let mut full = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DomainError::CapacityExceeded { max_attendees, .. }) => {
                assert_eq!(max_attendees, 1);
                full += 1;
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(full, 1);
    assert_eq!(
        h.repos.events.count_registrations(event_id).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_duplicate_registration_leaves_count_unchanged() {
    let h = harness();
    let (_, admin) = h.user(Role::Admin).await;
    let event_id = h.event(&admin, None).await;
    let (_, member) = h.user(Role::Member).await;

    h.services.events.register(&member, event_id).await.unwrap();
    let again = h.services.events.register(&member, event_id).await;

    assert!(matches!(again, Err(DomainError::AlreadyRegistered { .. })));
    let event = h.services.events.get(event_id).await.unwrap();
    assert_eq!(event.registered_count, 1);
    assert_eq!(event.spots_remaining(), None);
}

#[tokio::test]
async fn test_register_for_unknown_event() {
    let h = harness();
    let (_, member) = h.user(Role::Member).await;

    let result = h.services.events.register(&member, Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_registration_sends_confirmation() {
    let h = harness();
    let (_, admin) = h.user(Role::Admin).await;
    let event_id = h.event(&admin, Some(10)).await;
    let (member_user, member) = h.user(Role::Member).await;

    h.services.events.register(&member, event_id).await.unwrap();

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, member_user.email);
    assert_eq!(sent[0].subject, "Registration Confirmed: Site tour");
}

#[tokio::test]
async fn test_single_application_regardless_of_status() {
    let h = harness();
    let (_, admin) = h.user(Role::Admin).await;
    let (_, member) = h.user(Role::Member).await;

    let submitted = h
        .services
        .applications
        .submit(&member, application(&["Development"]))
        .await
        .unwrap();
    assert_eq!(submitted.status, ApplicationStatus::Pending);

    let pending_retry = h
        .services
        .applications
        .submit(&member, application(&["ESG"]))
        .await;
    assert!(matches!(
        pending_retry,
        Err(DomainError::DuplicateApplication { .. })
    ));

    h.services
        .applications
        .review(&admin, submitted.id, ReviewDecision::Reject)
        .await
        .unwrap();

    let rejected_retry = h
        .services
        .applications
        .submit(&member, application(&["ESG"]))
        .await;
    assert!(matches!(
        rejected_retry,
        Err(DomainError::DuplicateApplication { .. })
    ));
}

#[tokio::test]
async fn test_review_happens_once() {
    let h = harness();
    let (_, admin) = h.user(Role::Admin).await;
    let (_, member) = h.user(Role::Member).await;

    let submitted = h
        .services
        .applications
        .submit(&member, application(&["Development"]))
        .await
        .unwrap();

    let approved = h
        .services
        .applications
        .review(&admin, submitted.id, ReviewDecision::Approve)
        .await
        .unwrap();
    assert_eq!(approved.status, ApplicationStatus::Approved);
    assert_eq!(approved.reviewed_by, Some(admin.user_id));
    assert!(approved.reviewed_at.is_some());

    let second = h
        .services
        .applications
        .review(&admin, submitted.id, ReviewDecision::Reject)
        .await;
    assert!(matches!(
        second,
        Err(DomainError::InvalidTransition {
            current: ApplicationStatus::Approved
        })
    ));

    let missing = h
        .services
        .applications
        .review(&admin, Uuid::new_v4(), ReviewDecision::Approve)
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_member_cannot_review() {
    let h = harness();
    let (_, member) = h.user(Role::Member).await;
    let (_, other) = h.user(Role::Member).await;

    let submitted = h
        .services
        .applications
        .submit(&other, application(&["Development"]))
        .await
        .unwrap();

    let result = h
        .services
        .applications
        .review(&member, submitted.id, ReviewDecision::Approve)
        .await;
    assert!(matches!(result, Err(DomainError::Permission(_))));

    let listing = h.services.applications.list(&member, None).await;
    assert!(matches!(listing, Err(DomainError::Permission(_))));
}

#[tokio::test]
async fn test_admins_notified_on_submit() {
    let h = harness();
    let (admin_user, _) = h.user(Role::Admin).await;
    let (_, member) = h.user(Role::Member).await;

    h.services
        .applications
        .submit(&member, application(&["Development"]))
        .await
        .unwrap();

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, admin_user.email);
    assert_eq!(sent[0].subject, "New Member Application");
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_operations() {
    let h = harness_with(MockNotificationService::failing());
    let (_, admin) = h.user(Role::Admin).await;
    let (_, member) = h.user(Role::Member).await;
    let event_id = h.event(&admin, Some(5)).await;

    let submitted = h
        .services
        .applications
        .submit(&member, application(&["Development"]))
        .await;
    assert!(submitted.is_ok());

    let registered = h.services.events.register(&member, event_id).await;
    assert!(registered.is_ok());
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_compute_matches_orders_by_score() {
    let h = harness();
    let (_, admin) = h.user(Role::Admin).await;
    let (_, alumni) = h.user(Role::Alumni).await;

    let mut ids = Vec::new();
    for interests in [
        vec!["Development", "Development", "ESG"],
        vec!["Investment/REPE", "Development"],
        vec!["ESG"],
    ] {
        let (user, actor) = h.user(Role::Member).await;
        let submitted = h
            .services
            .applications
            .submit(&actor, application(&interests))
            .await
            .unwrap();
        h.services
            .applications
            .review(&admin, submitted.id, ReviewDecision::Approve)
            .await
            .unwrap();
        ids.push(user.id);
    }

    let matches = h
        .services
        .matching
        .compute_matches(&alumni, Some("mentorship"))
        .await
        .unwrap();

    let ordered: Vec<(Uuid, usize)> = matches.iter().map(|m| (m.user.id, m.match_score)).collect();
    assert_eq!(ordered, vec![(ids[1], 2), (ids[0], 1)]);

    let speaking = h
        .services
        .matching
        .compute_matches(&alumni, Some("speaking"))
        .await
        .unwrap();
    assert!(speaking.is_empty());
}

#[tokio::test]
async fn test_collaboration_submit_updates_profile_and_counts_matches() {
    let h = harness();
    let (_, admin) = h.user(Role::Admin).await;
    let (_, member) = h.user(Role::Member).await;
    let (_, alumni) = h.user(Role::Alumni).await;

    let submitted = h
        .services
        .applications
        .submit(&member, application(&["development", "ESG"]))
        .await
        .unwrap();
    h.services
        .applications
        .review(&admin, submitted.id, ReviewDecision::Approve)
        .await
        .unwrap();

    let response = h
        .services
        .collaborations
        .submit(
            &alumni,
            SubmitCollaborationRequest {
                company: "Hines".to_string(),
                position: "Director".to_string(),
                industry: "Development".to_string(),
                collaboration_type: CollaborationType::Mentorship,
                details: "Monthly mentoring".to_string(),
                linkedin_url: Some("https://www.linkedin.com/in/example".to_string()),
                specializations: vec![" Development ".to_string()],
            },
        )
        .await
        .unwrap();

    assert_eq!(response.potential_matches, 1);
    assert!(response.offer.is_active);

    let profile = h
        .services
        .profiles
        .get_mine(&alumni)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.specializations, vec!["Development".to_string()]);

    let offer_matches = h
        .services
        .matching
        .offer_matches(&alumni, Some("mentorship"))
        .await
        .unwrap();
    assert_eq!(offer_matches.len(), 1);
    assert_eq!(offer_matches[0].common_interests, vec!["development".to_string()]);

    let deactivated = h
        .services
        .collaborations
        .deactivate(&alumni, response.offer.id)
        .await
        .unwrap();
    assert!(!deactivated.is_active);

    let not_owner = h
        .services
        .collaborations
        .deactivate(&member, response.offer.id)
        .await;
    assert!(matches!(not_owner, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_member_cannot_submit_collaboration() {
    let h = harness();
    let (_, member) = h.user(Role::Member).await;

    let result = h
        .services
        .collaborations
        .submit(
            &member,
            SubmitCollaborationRequest {
                company: "Acme".to_string(),
                position: "Analyst".to_string(),
                industry: "Brokerage".to_string(),
                collaboration_type: CollaborationType::Speaking,
                details: "Guest talk".to_string(),
                linkedin_url: None,
                specializations: vec![],
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::Permission(_))));
}

#[tokio::test]
async fn test_resource_listing_filtered_by_role() {
    let h = harness();
    let (_, admin) = h.user(Role::Admin).await;
    let (_, member) = h.user(Role::Member).await;

    let mut admin_only = None;
    for (title, level) in [
        ("Market report", AccessLevel::Public),
        ("Deal memo template", AccessLevel::Member),
        ("Board minutes", AccessLevel::Admin),
    ] {
        let resource = h
            .services
            .resources
            .create(
                &admin,
                CreateResourceRequest {
                    title: title.to_string(),
                    description: String::new(),
                    file_url: "https://files.trea.test/doc.pdf".to_string(),
                    resource_type: "document".to_string(),
                    access_level: level,
                    tags: vec!["finance".to_string()],
                },
            )
            .await
            .unwrap();
        if level == AccessLevel::Admin {
            admin_only = Some(resource.id);
        }
    }

    assert_eq!(h.services.resources.list(&admin).await.unwrap().len(), 3);

    let visible = h.services.resources.list(&member).await.unwrap();
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|r| r.access_level != AccessLevel::Admin));

    let hidden = h
        .services
        .resources
        .record_download(&member, admin_only.unwrap())
        .await;
    assert!(matches!(hidden, Err(DomainError::NotFound { .. })));

    let downloaded = h
        .services
        .resources
        .record_download(&admin, admin_only.unwrap())
        .await
        .unwrap();
    assert_eq!(downloaded.download_count, 1);
}

#[tokio::test]
async fn test_dashboard_counts() {
    let h = harness();
    let (_, admin) = h.user(Role::Admin).await;
    h.event(&admin, None).await;

    let mut first = None;
    for _ in 0..2 {
        let (_, member) = h.user(Role::Member).await;
        let submitted = h
            .services
            .applications
            .submit(&member, application(&["Development"]))
            .await
            .unwrap();
        first.get_or_insert(submitted.id);
    }
    h.services
        .applications
        .review(&admin, first.unwrap(), ReviewDecision::Approve)
        .await
        .unwrap();

    let dashboard = h.services.analytics.dashboard(&admin).await.unwrap();
    assert_eq!(dashboard.total_members, 1);
    assert_eq!(dashboard.pending_applications, 1);
    assert_eq!(dashboard.total_alumni, 0);
    assert_eq!(dashboard.upcoming_events, 1);
    assert_eq!(dashboard.new_members_30d, 1);
    assert_eq!(dashboard.member_growth_percentage, 100.0);

    let (_, member) = h.user(Role::Member).await;
    let denied = h.services.analytics.dashboard(&member).await;
    assert!(matches!(denied, Err(DomainError::Permission(_))));
}
