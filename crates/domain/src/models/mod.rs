//! Domain models for the TREA members platform.

pub mod analytics;
pub mod application;
pub mod collaboration;
pub mod event;
pub mod interest;
pub mod matching;
pub mod profile;
pub mod resource;
pub mod role;
pub mod user;

pub use analytics::{DashboardAnalytics, DashboardCounts};
pub use application::{
    ApplicationStatus, ListApplicationsQuery, MemberApplication, NewApplication,
    ReviewApplicationRequest, ReviewDecision, SubmitApplicationRequest,
};
pub use collaboration::{
    CollaborationOffer, CollaborationType, NewCollaborationOffer, SubmitCollaborationRequest,
    SubmitCollaborationResponse,
};
pub use event::{CreateEventRequest, Event, EventRegistration, ListEventsQuery, NewEvent};
pub use interest::{InterestSet, InterestTag};
pub use matching::{
    ApprovedMember, MatchQuery, MatchResult, MatchingSnapshot, MemberSummary, OfferMatchResult,
};
pub use profile::{ExperienceLevel, MemberProfile, ProfileUpsert, UpdateProfileRequest};
pub use resource::{AccessLevel, CreateResourceRequest, NewResource, Resource};
pub use role::{Actor, Capability, Role};
pub use user::{
    normalize_email, LoginRequest, NewUser, RegisterRequest, TokenResponse, User, UserResponse,
    UserStatus,
};
