//! Membership application domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Application lifecycle state.
///
/// `Pending` moves once to `Approved` or `Rejected`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(format!("Invalid application status: {}", s)),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome chosen by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    pub fn target_status(&self) -> ApplicationStatus {
        match self {
            ReviewDecision::Approve => ApplicationStatus::Approved,
            ReviewDecision::Reject => ApplicationStatus::Rejected,
        }
    }
}

/// A membership application. At most one exists per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberApplication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub graduation_year: i32,
    pub major: String,
    pub career_interests: Vec<String>,
    pub gpa: Option<f64>,
    pub interest_reason: String,
    pub experience: Option<String>,
    pub goals: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
}

/// Request payload for submitting an application.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SubmitApplicationRequest {
    #[validate(custom(function = "shared::validation::validate_graduation_year"))]
    pub graduation_year: i32,

    #[validate(length(min = 1, max = 100, message = "Major must be 1-100 characters"))]
    pub major: String,

    #[validate(custom(function = "shared::validation::validate_required_tags"))]
    pub career_interests: Vec<String>,

    #[validate(custom(function = "crate::models::application::validate_optional_gpa"))]
    pub gpa: Option<f64>,

    #[validate(length(min = 1, max = 2000, message = "Interest reason must be 1-2000 characters"))]
    pub interest_reason: String,

    #[validate(length(max = 2000, message = "Experience must be at most 2000 characters"))]
    pub experience: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "Goals must be 1-2000 characters"))]
    pub goals: String,
}

/// Validates optional GPA.
pub fn validate_optional_gpa(gpa: f64) -> Result<(), validator::ValidationError> {
    shared::validation::validate_gpa(gpa)
}

/// Fields needed to insert a pending application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: Uuid,
    pub graduation_year: i32,
    pub major: String,
    pub career_interests: Vec<String>,
    pub gpa: Option<f64>,
    pub interest_reason: String,
    pub experience: Option<String>,
    pub goals: String,
    pub submitted_at: DateTime<Utc>,
}

impl NewApplication {
    pub fn from_request(
        user_id: Uuid,
        request: SubmitApplicationRequest,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            graduation_year: request.graduation_year,
            major: request.major.trim().to_string(),
            career_interests: request
                .career_interests
                .iter()
                .map(|t| t.trim().to_string())
                .collect(),
            gpa: request.gpa,
            interest_reason: request.interest_reason,
            experience: request.experience,
            goals: request.goals,
            submitted_at,
        }
    }
}

/// Request payload for reviewing an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReviewApplicationRequest {
    pub decision: ReviewDecision,
}

/// Query parameters for listing applications.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListApplicationsQuery {
    pub status: Option<ApplicationStatus>,
}
