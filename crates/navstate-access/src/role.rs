//! Roles and the role directory.
//!
//! A role is a named bundle of permission strings in one of three forms:
//!
//! - `*` — global wildcard, grants everything;
//! - `<resource>:*` — resource wildcard, grants every action on one
//!   resource;
//! - `<resource>:<action>` — exact grant.
//!
//! The directory maps role identifiers to role objects, for accounts that
//! reference their role by id instead of embedding it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named bundle of permissions assigned to accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Permission strings in the three recognized forms.
    pub permissions: Vec<String>,
}

impl Role {
    /// Create a role from an id, display name, and permission strings.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        permissions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }
}

/// The built-in administrator role — global wildcard grant.
#[must_use]
pub fn administrator_role() -> Role {
    Role::new("administrator", "Administrator", ["*"])
}

/// Lookup table of known roles, keyed by identifier.
///
/// Populated by whatever loads role definitions (an external
/// collaborator); consulted only when an account carries a role id rather
/// than an embedded role.
#[derive(Debug, Clone, Default)]
pub struct RoleDirectory {
    roles: HashMap<String, Role>,
}

impl RoleDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a role, replacing any previous definition under the same
    /// id.
    pub fn register(&mut self, role: Role) {
        self.roles.insert(role.id.clone(), role);
    }

    /// Look up a role by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }

    /// Remove a role definition. Returns the removed role, if any.
    pub fn remove(&mut self, id: &str) -> Option<Role> {
        self.roles.remove(id)
    }

    /// Number of registered roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether no roles are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
