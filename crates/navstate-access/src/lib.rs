//! Permission evaluation for a client shell.
//!
//! Answers "may the active account see this?" without UI components ever
//! learning the role/permission representation. An account's role —
//! embedded or resolved through the [`RoleDirectory`] — derives a
//! [`PermissionSet`] of wildcard and exact grants, queried through the
//! [`AccessEvaluator`] or gated declaratively with a [`PermissionGuard`].
//!
//! Failure is modeled as absence throughout: no active account, an
//! account without a role, and an unresolved role identifier all evaluate
//! as the empty permission set (the unresolved case is logged). The one
//! loud failure is a guard evaluated outside its session context — see
//! [`GuardError`].

pub mod account;
pub mod error;
pub mod guard;
pub mod permission;
pub mod role;

pub use account::{Account, RoleRef, SessionStore};
pub use error::GuardError;
pub use guard::{GuardOutcome, GuardRequirement, PermissionGuard};
pub use permission::{AccessEvaluator, PermissionSet};
pub use role::{Role, RoleDirectory, administrator_role};
