//! Membership application lifecycle.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::{
    Actor, ApplicationStatus, Capability, MemberApplication, NewApplication, ReviewDecision, Role,
    SubmitApplicationRequest,
};
use crate::repositories::{ApplicationRepository, UserRepository};
use crate::services::access::authorize;
use crate::services::notification::{dispatch, NotificationService};

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn NotificationService>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            applications,
            users,
            notifier,
        }
    }

    /// Submits the actor's application. One per user, whatever its status.
    pub async fn submit(
        &self,
        actor: &Actor,
        request: SubmitApplicationRequest,
    ) -> DomainResult<MemberApplication> {
        authorize(actor, Capability::SubmitApplication)?;
        request.validate()?;

        let new = NewApplication::from_request(actor.user_id, request, Utc::now());
        let application = self
            .applications
            .insert_if_absent(new)
            .await?
            .ok_or(DomainError::DuplicateApplication {
                user_id: actor.user_id,
            })?;

        metrics::counter!("applications_submitted_total").increment(1);
        tracing::info!(
            application_id = %application.id,
            user_id = %actor.user_id,
            "Application submitted"
        );

        self.notify_admins(&application).await;
        Ok(application)
    }

    /// The actor's own application, if any.
    pub async fn my_application(&self, actor: &Actor) -> DomainResult<Option<MemberApplication>> {
        self.applications.find_by_user(actor.user_id).await
    }

    /// All applications, optionally filtered by status, oldest first.
    pub async fn list(
        &self,
        actor: &Actor,
        status: Option<ApplicationStatus>,
    ) -> DomainResult<Vec<MemberApplication>> {
        authorize(actor, Capability::ReviewApplications)?;
        self.applications.list(status).await
    }

    /// Approves or rejects a pending application.
    pub async fn review(
        &self,
        actor: &Actor,
        application_id: Uuid,
        decision: ReviewDecision,
    ) -> DomainResult<MemberApplication> {
        authorize(actor, Capability::ReviewApplications)?;

        let target = decision.target_status();
        if let Some(reviewed) = self
            .applications
            .review(application_id, target, actor.user_id, Utc::now())
            .await?
        {
            tracing::info!(
                application_id = %application_id,
                reviewer_id = %actor.user_id,
                status = %target,
                "Application reviewed"
            );
            self.notify_applicant(&reviewed).await;
            return Ok(reviewed);
        }

        // Lost the conditional update: either missing or already decided.
        match self.applications.find_by_id(application_id).await? {
            None => Err(DomainError::not_found("Application", application_id)),
            Some(existing) => Err(DomainError::InvalidTransition {
                current: existing.status,
            }),
        }
    }

    async fn notify_admins(&self, application: &MemberApplication) {
        let applicant = match self.users.find_by_id(application.user_id).await {
            Ok(Some(user)) => user.full_name(),
            Ok(None) => application.user_id.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load applicant for notification");
                application.user_id.to_string()
            }
        };

        let admins = match self.users.list_by_role(Role::Admin).await {
            Ok(admins) => admins,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load admins for notification");
                return;
            }
        };

        let body = format!("New application from {}", applicant);
        for admin in admins {
            dispatch(
                self.notifier.as_ref(),
                &admin.email,
                "New Member Application",
                &body,
            )
            .await;
        }
    }

    async fn notify_applicant(&self, application: &MemberApplication) {
        let user = match self.users.find_by_id(application.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load applicant for notification");
                return;
            }
        };

        let body = format!(
            "Hi {}, your TREA membership application has been {}.",
            user.first_name, application.status
        );
        dispatch(
            self.notifier.as_ref(),
            &user.email,
            "Membership Application Update",
            &body,
        )
        .await;
    }
}
