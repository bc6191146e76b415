//! Alumni collaboration offer domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Kind of collaboration an alumnus offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationType {
    Mentorship,
    Speaking,
    Funding,
    Consulting,
}

impl CollaborationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollaborationType::Mentorship => "mentorship",
            CollaborationType::Speaking => "speaking",
            CollaborationType::Funding => "funding",
            CollaborationType::Consulting => "consulting",
        }
    }
}

impl FromStr for CollaborationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mentorship" => Ok(CollaborationType::Mentorship),
            "speaking" => Ok(CollaborationType::Speaking),
            "funding" => Ok(CollaborationType::Funding),
            "consulting" => Ok(CollaborationType::Consulting),
            _ => Err(format!("Unknown collaboration type: {}", s)),
        }
    }
}

impl fmt::Display for CollaborationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An alumni collaboration offer. Withdrawn by deactivation, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CollaborationOffer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub position: String,
    pub industry: String,
    pub collaboration_type: CollaborationType,
    pub details: String,
    pub linkedin_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for submitting a collaboration offer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SubmitCollaborationRequest {
    #[validate(length(min = 1, max = 200, message = "Company must be 1-200 characters"))]
    pub company: String,

    #[validate(length(min = 1, max = 200, message = "Position must be 1-200 characters"))]
    pub position: String,

    #[validate(length(min = 1, max = 100, message = "Industry must be 1-100 characters"))]
    pub industry: String,

    pub collaboration_type: CollaborationType,

    #[validate(length(min = 1, max = 4000, message = "Details must be 1-4000 characters"))]
    pub details: String,

    #[validate(custom(function = "shared::validation::validate_linkedin_url"))]
    pub linkedin_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_tags"))]
    #[serde(default)]
    pub specializations: Vec<String>,
}

/// Fields needed to insert an offer.
#[derive(Debug, Clone)]
pub struct NewCollaborationOffer {
    pub user_id: Uuid,
    pub company: String,
    pub position: String,
    pub industry: String,
    pub collaboration_type: CollaborationType,
    pub details: String,
    pub linkedin_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response for a submitted offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitCollaborationResponse {
    pub offer: CollaborationOffer,
    /// Number of approved members sharing at least one specialization.
    pub potential_matches: usize,
}
