//! Interest matching models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::{CollaborationOffer, MemberApplication, MemberProfile, User};

/// The parts of a user shown next to a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for MemberSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// A member with an approved application.
#[derive(Debug, Clone)]
pub struct ApprovedMember {
    pub user: MemberSummary,
    pub application: MemberApplication,
    pub profile: Option<MemberProfile>,
}

/// Point-in-time view of everything the matcher reads.
#[derive(Debug, Clone, Default)]
pub struct MatchingSnapshot {
    /// Ordered by application `submitted_at`, then id.
    pub members: Vec<ApprovedMember>,
    /// Active offers of the requested type, ordered by `created_at`, then id.
    pub offers: Vec<CollaborationOffer>,
    /// Profiles of the offer owners, keyed by user id.
    pub alumni_profiles: HashMap<Uuid, MemberProfile>,
}

/// A member scored against a reference interest set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchResult {
    pub user: MemberSummary,
    pub profile: Option<MemberProfile>,
    pub application: MemberApplication,
    pub match_score: usize,
}

/// A member scored against one alumni offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OfferMatchResult {
    pub alumni_id: Uuid,
    pub offer_id: Uuid,
    pub user: MemberSummary,
    pub profile: Option<MemberProfile>,
    pub application: MemberApplication,
    pub match_score: usize,
    pub common_interests: Vec<String>,
}

/// Query parameters for match endpoints.
///
/// Kept as a raw string: an unknown type yields no matches rather than an error.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct MatchQuery {
    pub collaboration_type: Option<String>,
}
