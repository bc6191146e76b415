//! Admin dashboard analytics models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw counts read from storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    /// Approved applications.
    pub total_members: i64,
    pub pending_applications: i64,
    /// Active collaboration offers.
    pub total_alumni: i64,
    /// Events dated after the reference instant.
    pub upcoming_events: i64,
    /// Approved applications submitted after the growth window start.
    pub new_members_30d: i64,
}

/// Dashboard response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardAnalytics {
    pub total_members: i64,
    pub pending_applications: i64,
    pub total_alumni: i64,
    pub upcoming_events: i64,
    pub new_members_30d: i64,
    pub member_growth_percentage: f64,
    pub generated_at: DateTime<Utc>,
}

impl DashboardAnalytics {
    pub fn from_counts(counts: DashboardCounts, generated_at: DateTime<Utc>) -> Self {
        Self {
            total_members: counts.total_members,
            pending_applications: counts.pending_applications,
            total_alumni: counts.total_alumni,
            upcoming_events: counts.upcoming_events,
            new_members_30d: counts.new_members_30d,
            member_growth_percentage: growth_percentage(
                counts.new_members_30d,
                counts.total_members,
            ),
            generated_at,
        }
    }
}

/// `new / max(total, 1) * 100`, rounded to one decimal place.
pub fn growth_percentage(new_members: i64, total_members: i64) -> f64 {
    let ratio = new_members as f64 / total_members.max(1) as f64 * 100.0;
    (ratio * 10.0).round() / 10.0
}
