//! Domain services for the TREA members platform.
//!
//! Services contain business logic and talk to storage only through the
//! repository traits they are constructed with.

pub mod access;
pub mod analytics;
pub mod applications;
pub mod collaborations;
pub mod events;
pub mod matching;
pub mod notification;
pub mod profiles;
pub mod resources;

use std::sync::Arc;

use crate::repositories::Repositories;

pub use access::authorize;
pub use analytics::AnalyticsService;
pub use applications::ApplicationService;
pub use collaborations::CollaborationService;
pub use events::EventService;
pub use matching::MatchingService;
pub use notification::{
    dispatch, DisabledNotificationService, LoggingNotificationService, MockNotificationService,
    NotificationResult, NotificationService, SentNotification,
};
pub use profiles::ProfileService;
pub use resources::ResourceService;

/// Every domain service, wired to one set of repositories and one notifier.
#[derive(Clone)]
pub struct Services {
    pub applications: ApplicationService,
    pub events: EventService,
    pub matching: MatchingService,
    pub collaborations: CollaborationService,
    pub profiles: ProfileService,
    pub resources: ResourceService,
    pub analytics: AnalyticsService,
}

impl Services {
    pub fn new(repos: &Repositories, notifier: Arc<dyn NotificationService>) -> Self {
        let matching = MatchingService::new(repos.matching.clone());

        Self {
            applications: ApplicationService::new(
                repos.applications.clone(),
                repos.users.clone(),
                notifier.clone(),
            ),
            events: EventService::new(repos.events.clone(), repos.users.clone(), notifier),
            collaborations: CollaborationService::new(repos.collaborations.clone(), matching.clone()),
            matching,
            profiles: ProfileService::new(repos.profiles.clone()),
            resources: ResourceService::new(repos.resources.clone()),
            analytics: AnalyticsService::new(repos.analytics.clone()),
        }
    }
}
