//! Declarative permission guard.
//!
//! A guard is the data form of "render this only if the active account
//! may see it": a single permission, or a list matched in `any`/`all`
//! mode. Rendering code builds one, hands it the evaluator, and picks the
//! protected branch or the fallback based on the outcome. The default
//! fallback — rendering nothing — belongs to the host, so denial is an
//! ordinary [`GuardOutcome::Denied`], not an error.
//!
//! The one loud failure is evaluating a guard with no session context at
//! all (`ctx == None`): see [`GuardError`].

use crate::error::GuardError;
use crate::permission::AccessEvaluator;

/// What a guard demands of the active account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardRequirement {
    /// One permission must be granted.
    Single(String),
    /// At least one of the listed permissions must be granted.
    AnyOf(Vec<String>),
    /// Every listed permission must be granted.
    AllOf(Vec<String>),
}

/// Whether the guard lets the protected content through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the protected content.
    Granted,
    /// Render the fallback (by default: nothing).
    Denied,
}

impl GuardOutcome {
    /// Whether this outcome renders the protected content.
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// A reusable gate for permission-protected UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGuard {
    requirement: GuardRequirement,
}

impl PermissionGuard {
    /// Guard on a single permission.
    #[must_use]
    pub fn require(permission: impl Into<String>) -> Self {
        Self {
            requirement: GuardRequirement::Single(permission.into()),
        }
    }

    /// Guard passing if any listed permission is granted.
    #[must_use]
    pub fn any_of(permissions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            requirement: GuardRequirement::AnyOf(
                permissions.into_iter().map(Into::into).collect(),
            ),
        }
    }

    /// Guard passing only if every listed permission is granted.
    #[must_use]
    pub fn all_of(permissions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            requirement: GuardRequirement::AllOf(
                permissions.into_iter().map(Into::into).collect(),
            ),
        }
    }

    /// The requirement this guard enforces.
    #[must_use]
    pub fn requirement(&self) -> &GuardRequirement {
        &self.requirement
    }

    /// Evaluate against the session context.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::NoSessionContext`] when `ctx` is `None` —
    /// the guard is being used outside its required ambient context, and
    /// proceeding silently would render unguarded content.
    pub fn evaluate(
        &self,
        ctx: Option<&AccessEvaluator<'_>>,
    ) -> Result<GuardOutcome, GuardError> {
        let evaluator = ctx.ok_or(GuardError::NoSessionContext)?;

        let granted = match &self.requirement {
            GuardRequirement::Single(permission) => evaluator.has_permission(permission),
            GuardRequirement::AnyOf(permissions) => {
                let refs: Vec<&str> = permissions.iter().map(String::as_str).collect();
                evaluator.has_any_permission(&refs)
            }
            GuardRequirement::AllOf(permissions) => {
                let refs: Vec<&str> = permissions.iter().map(String::as_str).collect();
                evaluator.has_all_permissions(&refs)
            }
        };

        Ok(if granted {
            GuardOutcome::Granted
        } else {
            GuardOutcome::Denied
        })
    }

    /// Evaluate and pick `protected` or `fallback` accordingly.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::NoSessionContext`] when `ctx` is `None`.
    pub fn select<V>(
        &self,
        ctx: Option<&AccessEvaluator<'_>>,
        protected: V,
        fallback: V,
    ) -> Result<V, GuardError> {
        Ok(match self.evaluate(ctx)? {
            GuardOutcome::Granted => protected,
            GuardOutcome::Denied => fallback,
        })
    }
}
