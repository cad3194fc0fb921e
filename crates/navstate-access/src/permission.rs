//! Permission evaluation.
//!
//! A permission query is a `resource:action` string checked against the
//! active role's grants in strict precedence order:
//!
//! 1. global wildcard `*` grants everything;
//! 2. an exact grant on the queried string;
//! 3. a resource wildcard `<resource>:*` on the queried resource;
//! 4. otherwise denied.
//!
//! No other matching form is recognized — deliberately no `*:action` and
//! no multi-segment resources. A query is one set lookup plus one
//! derived-key lookup, independent of how many permission strings other
//! roles carry.

use std::collections::HashSet;

use crate::account::SessionStore;
use crate::role::{Role, RoleDirectory};

/// The effective grants of one role, split by matching form.
///
/// Derived on demand, never stored: the session's account/role snapshot
/// is the single source of truth and staleness is bounded by it.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    grant_all: bool,
    exact: HashSet<String>,
    resource_wildcards: HashSet<String>,
}

impl PermissionSet {
    /// The empty set — every query denies. Used for "no account", "no
    /// role", and "unresolved role id" alike.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derive the set from a role's permission strings.
    #[must_use]
    pub fn from_role(role: &Role) -> Self {
        let mut set = Self::default();
        for permission in &role.permissions {
            if permission == "*" {
                set.grant_all = true;
            } else if let Some(resource) = permission.strip_suffix(":*") {
                set.resource_wildcards.insert(resource.to_owned());
            } else {
                set.exact.insert(permission.clone());
            }
        }
        set
    }

    /// Whether `permission` is granted under the precedence rule.
    #[must_use]
    pub fn has(&self, permission: &str) -> bool {
        if self.grant_all {
            return true;
        }
        if self.exact.contains(permission) {
            return true;
        }
        match permission.split_once(':') {
            Some((resource, _action)) => self.resource_wildcards.contains(resource),
            None => false,
        }
    }

    /// Whether at least one of `permissions` is granted. Short-circuits
    /// on the first grant; an empty input is vacuously `false`.
    pub fn has_any<'a>(&self, permissions: impl IntoIterator<Item = &'a str>) -> bool {
        permissions.into_iter().any(|p| self.has(p))
    }

    /// Whether every one of `permissions` is granted. Short-circuits on
    /// the first denial; an empty input is vacuously `true`.
    pub fn has_all<'a>(&self, permissions: impl IntoIterator<Item = &'a str>) -> bool {
        permissions.into_iter().all(|p| self.has(p))
    }
}

/// Answers authorization queries against the currently active account.
///
/// Borrows the session store and role directory; holds no state of its
/// own, so every query reflects the snapshot as it stands right now.
#[derive(Debug, Clone, Copy)]
pub struct AccessEvaluator<'a> {
    session: &'a SessionStore,
    directory: &'a RoleDirectory,
}

impl<'a> AccessEvaluator<'a> {
    /// Evaluator over the given session snapshot and role directory.
    #[must_use]
    pub fn new(session: &'a SessionStore, directory: &'a RoleDirectory) -> Self {
        Self { session, directory }
    }

    /// The active account's effective permission set. Empty when there is
    /// no active account, the account has no role, or the role id does
    /// not resolve.
    #[must_use]
    pub fn permission_set(&self) -> PermissionSet {
        self.session
            .active_role(self.directory)
            .map_or_else(PermissionSet::empty, PermissionSet::from_role)
    }

    /// Whether the active account holds `permission`.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permission_set().has(permission)
    }

    /// Whether the active account holds at least one of `permissions`.
    #[must_use]
    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        self.permission_set().has_any(permissions.iter().copied())
    }

    /// Whether the active account holds every one of `permissions`.
    #[must_use]
    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        self.permission_set().has_all(permissions.iter().copied())
    }
}
