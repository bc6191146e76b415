//! Resource library.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::{AccessLevel, Actor, Capability, CreateResourceRequest, NewResource, Resource};
use crate::repositories::ResourceRepository;
use crate::services::access::authorize;

#[derive(Clone)]
pub struct ResourceService {
    resources: Arc<dyn ResourceRepository>,
}

impl ResourceService {
    pub fn new(resources: Arc<dyn ResourceRepository>) -> Self {
        Self { resources }
    }

    /// Resources visible to the actor's role, newest first.
    pub async fn list(&self, actor: &Actor) -> DomainResult<Vec<Resource>> {
        self.resources
            .list_visible(AccessLevel::visible_to(actor.role))
            .await
    }

    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateResourceRequest,
    ) -> DomainResult<Resource> {
        authorize(actor, Capability::ManageResources)?;
        request.validate()?;

        let resource = self
            .resources
            .create(NewResource::from_request(actor.user_id, request, Utc::now()))
            .await?;

        tracing::info!(
            resource_id = %resource.id,
            access_level = %resource.access_level,
            "Resource created"
        );
        Ok(resource)
    }

    /// Counts a download. Resources the actor cannot see are reported as missing.
    pub async fn record_download(&self, actor: &Actor, resource_id: Uuid) -> DomainResult<Resource> {
        let visible = AccessLevel::visible_to(actor.role);
        match self.resources.find_by_id(resource_id).await? {
            Some(resource) if visible.contains(&resource.access_level) => {}
            _ => return Err(DomainError::not_found("Resource", resource_id)),
        }

        self.resources
            .record_download(resource_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Resource", resource_id))
    }
}
