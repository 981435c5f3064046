//! Capability checks against policy-guarded objects.
//!
//! The checker is a seam: the settings slice only asks "may this viewer do X to that
//! object", and the host application decides. [`OwnerPolicy`] is the stock rule set.

use panelkit_domain::capability::Capability;
use panelkit_domain::identity::{Identity, UserId};
use std::borrow::Cow;
use std::fmt::Debug;
use tracing::debug;

#[panelkit_derive::panelkit_error]
pub enum PolicyError {
    /// The viewer lacks the required capability.
    #[error("Access denied{}: {message}", format_context(.context))]
    Denied { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// An object whose access is governed by its owning account.
pub trait PolicyObject: Debug {
    fn policy_owner(&self) -> UserId;

    /// Name used in denial messages.
    fn policy_label(&self) -> Cow<'static, str> {
        Cow::Borrowed("object")
    }
}

/// Answers capability questions for a viewer on an object.
pub trait PolicyChecker: Debug + Send + Sync {
    fn capabilities(&self, viewer: &Identity, object: &dyn PolicyObject) -> Capability;

    fn has_capability(
        &self,
        viewer: &Identity,
        object: &dyn PolicyObject,
        capability: Capability,
    ) -> bool {
        self.capabilities(viewer, object).contains(capability)
    }
}

/// Owners hold every capability; administrators may view anything and edit when allowed.
#[derive(Debug, Clone, Copy)]
pub struct OwnerPolicy {
    administrators_can_edit: bool,
}

impl OwnerPolicy {
    #[must_use]
    pub const fn new(administrators_can_edit: bool) -> Self {
        Self { administrators_can_edit }
    }
}

impl Default for OwnerPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PolicyChecker for OwnerPolicy {
    fn capabilities(&self, viewer: &Identity, object: &dyn PolicyObject) -> Capability {
        if viewer.id == object.policy_owner() {
            return Capability::ALL;
        }
        if !viewer.is_administrator {
            return Capability::empty();
        }
        if self.administrators_can_edit { Capability::ALL } else { Capability::VIEW }
    }
}

/// Fails unless `viewer` holds `capability` on `object`.
///
/// # Errors
/// Returns [`PolicyError::Denied`] naming the viewer, the object and the missing capability.
pub fn require_capability(
    checker: &dyn PolicyChecker,
    viewer: &Identity,
    object: &dyn PolicyObject,
    capability: Capability,
) -> Result<(), PolicyError> {
    if checker.has_capability(viewer, object, capability) {
        return Ok(());
    }

    debug!(
        viewer = %viewer.id,
        owner = %object.policy_owner(),
        ?capability,
        "Capability check failed"
    );

    Err(PolicyError::Denied {
        message: format!(
            "user '{}' lacks {capability:?} on {} owned by user {}",
            viewer.username,
            object.policy_label(),
            object.policy_owner()
        )
        .into(),
        context: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Owned(UserId);

    impl PolicyObject for Owned {
        fn policy_owner(&self) -> UserId {
            self.0
        }
    }

    #[test]
    fn owner_holds_everything() {
        let policy = OwnerPolicy::new(false);
        let alice = Identity::new(1, "alice");
        assert_eq!(policy.capabilities(&alice, &Owned(UserId(1))), Capability::ALL);
    }

    #[test]
    fn administrators_edit_only_when_allowed() {
        let admin = Identity::new(2, "root").administrator();
        let target = Owned(UserId(1));

        assert!(OwnerPolicy::new(true).has_capability(&admin, &target, Capability::EDIT));
        assert!(!OwnerPolicy::new(false).has_capability(&admin, &target, Capability::EDIT));
        assert!(OwnerPolicy::new(false).has_capability(&admin, &target, Capability::VIEW));
    }

    #[test]
    fn strangers_are_denied_with_a_descriptive_error() {
        let err = require_capability(
            &OwnerPolicy::default(),
            &Identity::new(3, "mallory"),
            &Owned(UserId(1)),
            Capability::EDIT,
        )
        .expect_err("stranger must be denied");

        let message = err.to_string();
        assert!(message.contains("mallory"), "{message}");
        assert!(message.contains("owned by user 1"), "{message}");
    }
}
