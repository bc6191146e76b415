//! Member application entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{ApplicationStatus, MemberApplication};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for application_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatusDb {
    Pending,
    Approved,
    Rejected,
}

impl From<ApplicationStatusDb> for ApplicationStatus {
    fn from(db: ApplicationStatusDb) -> Self {
        match db {
            ApplicationStatusDb::Pending => Self::Pending,
            ApplicationStatusDb::Approved => Self::Approved,
            ApplicationStatusDb::Rejected => Self::Rejected,
        }
    }
}

impl From<ApplicationStatus> for ApplicationStatusDb {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Pending => Self::Pending,
            ApplicationStatus::Approved => Self::Approved,
            ApplicationStatus::Rejected => Self::Rejected,
        }
    }
}

/// Database row mapping for the member_applications table.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub graduation_year: i32,
    pub major: String,
    pub career_interests: Vec<String>,
    pub gpa: Option<f64>,
    pub interest_reason: String,
    pub experience: Option<String>,
    pub goals: String,
    pub status: ApplicationStatusDb,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
}

impl From<ApplicationEntity> for MemberApplication {
    fn from(entity: ApplicationEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            graduation_year: entity.graduation_year,
            major: entity.major,
            career_interests: entity.career_interests,
            gpa: entity.gpa,
            interest_reason: entity.interest_reason,
            experience: entity.experience,
            goals: entity.goals,
            status: entity.status.into(),
            submitted_at: entity.submitted_at,
            reviewed_at: entity.reviewed_at,
            reviewed_by: entity.reviewed_by,
        }
    }
}

/// Approved application joined with its applicant, as read by the matcher.
#[derive(Debug, Clone, FromRow)]
pub struct ApprovedMemberEntity {
    #[sqlx(flatten)]
    pub application: ApplicationEntity,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
