//! Roles, capabilities and the authenticated actor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The single role held by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
    Alumni,
}

/// An action guarded by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    SubmitApplication,
    ReviewApplications,
    ViewMatches,
    SubmitCollaboration,
    ManageEvents,
    RegisterForEvents,
    ManageResources,
    ViewAnalytics,
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::SubmitApplication,
        Capability::ReviewApplications,
        Capability::ViewMatches,
        Capability::SubmitCollaboration,
        Capability::ManageEvents,
        Capability::RegisterForEvents,
        Capability::ManageResources,
        Capability::ViewAnalytics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::SubmitApplication => "submit_application",
            Capability::ReviewApplications => "review_applications",
            Capability::ViewMatches => "view_matches",
            Capability::SubmitCollaboration => "submit_collaboration",
            Capability::ManageEvents => "manage_events",
            Capability::RegisterForEvents => "register_for_events",
            Capability::ManageResources => "manage_resources",
            Capability::ViewAnalytics => "view_analytics",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Alumni => "alumni",
        }
    }

    /// Whether this role is granted the capability.
    pub fn grants(&self, capability: Capability) -> bool {
        match self {
            Role::Admin => true,
            Role::Member => matches!(
                capability,
                Capability::SubmitApplication | Capability::RegisterForEvents
            ),
            Role::Alumni => matches!(
                capability,
                Capability::ViewMatches
                    | Capability::SubmitCollaboration
                    | Capability::RegisterForEvents
            ),
        }
    }

    /// Full capability map for this role, every capability present.
    pub fn permissions(&self) -> BTreeMap<Capability, bool> {
        Capability::ALL
            .iter()
            .map(|capability| (*capability, self.grants(*capability)))
            .collect()
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            "alumni" => Ok(Role::Alumni),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated caller of a domain operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }
}
