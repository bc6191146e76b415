//! Member profiles.

use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::error::DomainResult;
use crate::models::{Actor, MemberProfile, ProfileUpsert, UpdateProfileRequest};
use crate::repositories::ProfileRepository;

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn get_mine(&self, actor: &Actor) -> DomainResult<Option<MemberProfile>> {
        self.profiles.find_by_user(actor.user_id).await
    }

    /// Creates or replaces the actor's profile.
    pub async fn update_mine(
        &self,
        actor: &Actor,
        request: UpdateProfileRequest,
    ) -> DomainResult<MemberProfile> {
        request.validate()?;

        let profile = self
            .profiles
            .upsert(actor.user_id, ProfileUpsert::from(request), Utc::now())
            .await?;

        tracing::debug!(user_id = %actor.user_id, "Profile updated");
        Ok(profile)
    }
}
