//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod application;
pub mod collaboration;
pub mod event;
pub mod profile;
pub mod resource;
pub mod user;

pub use application::{ApplicationEntity, ApplicationStatusDb, ApprovedMemberEntity};
pub use collaboration::{CollaborationOfferEntity, CollaborationTypeDb};
pub use event::{EventEntity, EventRegistrationEntity};
pub use profile::{ExperienceLevelDb, ProfileEntity};
pub use resource::{AccessLevelDb, ResourceEntity};
pub use user::{RoleDb, UserEntity, UserStatusDb};
