//! Admin dashboard analytics.

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::error::DomainResult;
use crate::models::{Actor, Capability, DashboardAnalytics};
use crate::repositories::AnalyticsRepository;
use crate::services::access::authorize;

/// Window used for `new_members_30d`.
pub const GROWTH_WINDOW_DAYS: i64 = 30;

#[derive(Clone)]
pub struct AnalyticsService {
    analytics: Arc<dyn AnalyticsRepository>,
}

impl AnalyticsService {
    pub fn new(analytics: Arc<dyn AnalyticsRepository>) -> Self {
        Self { analytics }
    }

    pub async fn dashboard(&self, actor: &Actor) -> DomainResult<DashboardAnalytics> {
        authorize(actor, Capability::ViewAnalytics)?;

        let now = Utc::now();
        let counts = self
            .analytics
            .dashboard_counts(now, now - Duration::days(GROWTH_WINDOW_DAYS))
            .await?;

        Ok(DashboardAnalytics::from_counts(counts, now))
    }
}
