//! Member profile domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Career stage shown on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Student,
    Alumni,
    Professional,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Student => "student",
            ExperienceLevel::Alumni => "alumni",
            ExperienceLevel::Professional => "professional",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(ExperienceLevel::Student),
            "alumni" => Ok(ExperienceLevel::Alumni),
            "professional" => Ok(ExperienceLevel::Professional),
            _ => Err(format!("Invalid experience level: {}", s)),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member profile. At most one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub experience_level: ExperienceLevel,
    pub specializations: Vec<String>,
    pub portfolio_projects: Vec<String>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

/// Full set of owner-editable profile fields, written as one upsert.
#[derive(Debug, Clone)]
pub struct ProfileUpsert {
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub experience_level: ExperienceLevel,
    pub specializations: Vec<String>,
    pub portfolio_projects: Vec<String>,
    pub is_public: bool,
}

impl ProfileUpsert {
    /// Starting point for a user with no profile yet.
    pub fn blank(experience_level: ExperienceLevel) -> Self {
        Self {
            bio: None,
            linkedin_url: None,
            experience_level,
            specializations: Vec::new(),
            portfolio_projects: Vec::new(),
            is_public: true,
        }
    }
}

impl From<MemberProfile> for ProfileUpsert {
    fn from(profile: MemberProfile) -> Self {
        Self {
            bio: profile.bio,
            linkedin_url: profile.linkedin_url,
            experience_level: profile.experience_level,
            specializations: profile.specializations,
            portfolio_projects: profile.portfolio_projects,
            is_public: profile.is_public,
        }
    }
}

/// Request payload for updating one's own profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[validate(custom(function = "shared::validation::validate_linkedin_url"))]
    pub linkedin_url: Option<String>,

    pub experience_level: ExperienceLevel,

    #[validate(custom(function = "shared::validation::validate_tags"))]
    #[serde(default)]
    pub specializations: Vec<String>,

    #[validate(length(max = 50, message = "At most 50 portfolio projects"))]
    #[serde(default)]
    pub portfolio_projects: Vec<String>,

    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

impl From<UpdateProfileRequest> for ProfileUpsert {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            bio: request.bio,
            linkedin_url: request.linkedin_url,
            experience_level: request.experience_level,
            specializations: request
                .specializations
                .iter()
                .map(|s| s.trim().to_string())
                .collect(),
            portfolio_projects: request.portfolio_projects,
            is_public: request.is_public,
        }
    }
}
