//! Access policy checks.

use crate::error::{DomainError, DomainResult};
use crate::models::{Actor, Capability};

/// Fails with `Permission` unless the actor's role grants the capability.
pub fn authorize(actor: &Actor, capability: Capability) -> DomainResult<()> {
    if actor.role.grants(capability) {
        Ok(())
    } else {
        tracing::debug!(
            user_id = %actor.user_id,
            role = %actor.role,
            capability = %capability,
            "Capability denied"
        );
        Err(DomainError::Permission(capability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use uuid::Uuid;

    #[test]
    fn test_authorize() {
        let admin = Actor::new(Uuid::new_v4(), Role::Admin);
        let member = Actor::new(Uuid::new_v4(), Role::Member);

        assert!(authorize(&admin, Capability::ReviewApplications).is_ok());
        assert!(matches!(
            authorize(&member, Capability::ReviewApplications),
            Err(DomainError::Permission(Capability::ReviewApplications))
        ));
        assert!(authorize(&member, Capability::SubmitApplication).is_ok());
    }
}
