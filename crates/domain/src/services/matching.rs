//! Interest matcher.
//!
//! Scores approved members by how many of their (deduplicated) career
//! interests appear in a reference set. Members scoring zero are dropped and
//! the rest are stable-sorted by score, highest first, so ties keep the
//! snapshot order (`submitted_at`, then id).
//!
//! Two reference sets are supported:
//! - a fixed set used by the per-type query ([`reference_interests`]);
//! - an alumni profile's specializations, once per active offer
//!   ([`match_offers`]).

use std::sync::Arc;

use crate::error::DomainResult;
use crate::models::{
    Actor, ApprovedMember, Capability, CollaborationType, InterestSet, MatchResult,
    MatchingSnapshot, OfferMatchResult,
};
use crate::repositories::MatchingRepository;
use crate::services::access::authorize;

/// Reference interests for mentorship and consulting queries.
pub const CORE_INTERESTS: [&str; 2] = ["Investment/REPE", "Development"];

/// Parses a query parameter; unknown or blank values yield `None`.
pub fn parse_collaboration_type(raw: Option<&str>) -> Option<CollaborationType> {
    raw.and_then(|value| value.parse().ok())
}

/// Reference set for the per-type query. Empty for speaking, funding and
/// unknown types.
pub fn reference_interests(collaboration_type: Option<CollaborationType>) -> InterestSet {
    match collaboration_type {
        Some(CollaborationType::Mentorship) | Some(CollaborationType::Consulting) => {
            InterestSet::from_raw(CORE_INTERESTS)
        }
        Some(CollaborationType::Speaking) | Some(CollaborationType::Funding) | None => {
            InterestSet::new()
        }
    }
}

/// Scores every member against `reference`.
pub fn match_members(members: &[ApprovedMember], reference: &InterestSet) -> Vec<MatchResult> {
    if reference.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<MatchResult> = members
        .iter()
        .filter_map(|member| {
            let interests = InterestSet::from_raw(&member.application.career_interests);
            let match_score = interests.intersection(reference).len();
            (match_score > 0).then(|| MatchResult {
                user: member.user.clone(),
                profile: member.profile.clone(),
                application: member.application.clone(),
                match_score,
            })
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    results
}

/// Scores every member against each active offer's owner specializations.
///
/// Offers whose owner has no profile, or an empty specialization set,
/// contribute nothing.
pub fn match_offers(snapshot: &MatchingSnapshot) -> Vec<OfferMatchResult> {
    let mut results = Vec::new();

    for offer in snapshot.offers.iter().filter(|o| o.is_active) {
        let Some(profile) = snapshot.alumni_profiles.get(&offer.user_id) else {
            continue;
        };
        let specializations = InterestSet::from_raw(&profile.specializations);
        if specializations.is_empty() {
            continue;
        }

        for member in &snapshot.members {
            let interests = InterestSet::from_raw(&member.application.career_interests);
            let common = interests.intersection(&specializations);
            if common.is_empty() {
                continue;
            }
            results.push(OfferMatchResult {
                alumni_id: offer.user_id,
                offer_id: offer.id,
                user: member.user.clone(),
                profile: member.profile.clone(),
                application: member.application.clone(),
                match_score: common.len(),
                common_interests: common.iter().map(|t| t.as_str().to_string()).collect(),
            });
        }
    }

    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    results
}

/// Runs the matcher against a storage snapshot.
#[derive(Clone)]
pub struct MatchingService {
    repository: Arc<dyn MatchingRepository>,
}

impl MatchingService {
    pub fn new(repository: Arc<dyn MatchingRepository>) -> Self {
        Self { repository }
    }

    /// Approved members matched against the fixed reference set for the type.
    pub async fn compute_matches(
        &self,
        actor: &Actor,
        collaboration_type: Option<&str>,
    ) -> DomainResult<Vec<MatchResult>> {
        authorize(actor, Capability::ViewMatches)?;

        let reference = reference_interests(parse_collaboration_type(collaboration_type));
        if reference.is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = self.repository.snapshot(None).await?;
        let results = match_members(&snapshot.members, &reference);

        tracing::debug!(
            collaboration_type = ?collaboration_type,
            candidates = snapshot.members.len(),
            matches = results.len(),
            "Computed matches"
        );
        Ok(results)
    }

    /// Approved members matched against every active offer of the type.
    pub async fn offer_matches(
        &self,
        actor: &Actor,
        collaboration_type: Option<&str>,
    ) -> DomainResult<Vec<OfferMatchResult>> {
        authorize(actor, Capability::ViewMatches)?;

        match parse_collaboration_type(collaboration_type) {
            Some(kind) => self.offer_matches_for(kind).await,
            None => Ok(Vec::new()),
        }
    }

    /// Offer matches for a known type, without a capability check.
    pub(crate) async fn offer_matches_for(
        &self,
        collaboration_type: CollaborationType,
    ) -> DomainResult<Vec<OfferMatchResult>> {
        let snapshot = self.repository.snapshot(Some(collaboration_type)).await?;
        Ok(match_offers(&snapshot))
    }
}
