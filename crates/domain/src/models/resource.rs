//! Resource library domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::Role;

/// Who may see a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Member,
    Admin,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Member => "member",
            AccessLevel::Admin => "admin",
        }
    }

    /// Access levels a role may list.
    pub fn visible_to(role: Role) -> &'static [AccessLevel] {
        match role {
            Role::Admin => &[AccessLevel::Public, AccessLevel::Member, AccessLevel::Admin],
            Role::Member | Role::Alumni => &[AccessLevel::Public, AccessLevel::Member],
        }
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(AccessLevel::Public),
            "member" => Ok(AccessLevel::Member),
            "admin" => Ok(AccessLevel::Admin),
            _ => Err(format!("Invalid access level: {}", s)),
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A library resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub resource_type: String,
    pub access_level: AccessLevel,
    pub tags: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub download_count: i64,
}

/// Request payload for creating a resource.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateResourceRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 4000, message = "Description must be at most 4000 characters"))]
    #[serde(default)]
    pub description: String,

    #[validate(url(message = "File URL must be a valid URL"))]
    pub file_url: String,

    #[validate(length(min = 1, max = 50, message = "Resource type must be 1-50 characters"))]
    pub resource_type: String,

    #[serde(default = "default_access_level")]
    pub access_level: AccessLevel,

    #[validate(custom(function = "shared::validation::validate_tags"))]
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_access_level() -> AccessLevel {
    AccessLevel::Member
}

/// Fields needed to insert a resource.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub resource_type: String,
    pub access_level: AccessLevel,
    pub tags: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl NewResource {
    pub fn from_request(
        created_by: Uuid,
        request: CreateResourceRequest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: request.title,
            description: request.description,
            file_url: request.file_url,
            resource_type: request.resource_type,
            access_level: request.access_level,
            tags: request.tags.iter().map(|t| t.trim().to_string()).collect(),
            created_by,
            created_at,
        }
    }
}
