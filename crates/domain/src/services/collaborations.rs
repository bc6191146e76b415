//! Alumni collaboration offers.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::{
    Actor, Capability, CollaborationOffer, NewCollaborationOffer, SubmitCollaborationRequest,
    SubmitCollaborationResponse,
};
use crate::repositories::CollaborationRepository;
use crate::services::access::authorize;
use crate::services::matching::MatchingService;

#[derive(Clone)]
pub struct CollaborationService {
    collaborations: Arc<dyn CollaborationRepository>,
    matching: MatchingService,
}

impl CollaborationService {
    pub fn new(collaborations: Arc<dyn CollaborationRepository>, matching: MatchingService) -> Self {
        Self {
            collaborations,
            matching,
        }
    }

    /// Records an offer, refreshes the submitter's profile specializations and
    /// reports how many approved members the offer type now matches.
    pub async fn submit(
        &self,
        actor: &Actor,
        request: SubmitCollaborationRequest,
    ) -> DomainResult<SubmitCollaborationResponse> {
        authorize(actor, Capability::SubmitCollaboration)?;
        request.validate()?;

        let specializations = request
            .specializations
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        let offer = self
            .collaborations
            .create_with_profile(
                NewCollaborationOffer {
                    user_id: actor.user_id,
                    company: request.company.trim().to_string(),
                    position: request.position.trim().to_string(),
                    industry: request.industry.trim().to_string(),
                    collaboration_type: request.collaboration_type,
                    details: request.details,
                    linkedin_url: request.linkedin_url,
                    created_at: Utc::now(),
                },
                specializations,
            )
            .await?;

        let potential_matches = self
            .matching
            .offer_matches_for(offer.collaboration_type)
            .await?
            .len();

        tracing::info!(
            offer_id = %offer.id,
            user_id = %actor.user_id,
            collaboration_type = %offer.collaboration_type,
            potential_matches,
            "Collaboration offer submitted"
        );

        Ok(SubmitCollaborationResponse {
            offer,
            potential_matches,
        })
    }

    pub async fn list_mine(&self, actor: &Actor) -> DomainResult<Vec<CollaborationOffer>> {
        self.collaborations.list_by_user(actor.user_id).await
    }

    /// Withdraws one of the actor's own offers.
    pub async fn deactivate(&self, actor: &Actor, offer_id: Uuid) -> DomainResult<CollaborationOffer> {
        let offer = self
            .collaborations
            .deactivate(offer_id, actor.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("CollaborationOffer", offer_id))?;

        tracing::info!(offer_id = %offer_id, user_id = %actor.user_id, "Collaboration offer deactivated");
        Ok(offer)
    }
}
