//! Accounts and the active-session store.
//!
//! An account carries its role either as an embedded object or as an
//! identifier into the [`RoleDirectory`]. The session store tracks the
//! known accounts and which one is active; resolution of the active role
//! is the single place the embedded/referenced distinction is handled.
//!
//! An unresolved role identifier degrades to "no role" — it is logged at
//! `warn!` so a typo'd id is visible to operators, but it is never
//! surfaced as an error, and the account simply evaluates with an empty
//! permission set.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::role::{Role, RoleDirectory};

/// How an account carries its role: embedded or by identifier.
///
/// Untagged so the upstream account payload can use either a bare id
/// string (`"role": "editor"`) or a full role object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    /// The full role object, embedded in the account.
    Embedded(Role),
    /// A role identifier, resolved through the [`RoleDirectory`].
    Id(String),
}

/// A user account known to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: String,
    /// The account's role, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleRef>,
}

impl Account {
    /// Account with an embedded role.
    #[must_use]
    pub fn with_role(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role: Some(RoleRef::Embedded(role)),
        }
    }

    /// Account referencing a role by identifier.
    #[must_use]
    pub fn with_role_id(id: impl Into<String>, role_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Some(RoleRef::Id(role_id.into())),
        }
    }

    /// Account with no role at all.
    #[must_use]
    pub fn without_role(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: None,
        }
    }
}

/// Session-lifetime store of accounts and the active selection.
///
/// Maintained by the auth flow (an external collaborator); the permission
/// evaluator only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    accounts: Vec<Account>,
    active_account_id: Option<String>,
}

impl SessionStore {
    /// Empty session: no accounts, nobody active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the known accounts. Does not change the active selection;
    /// if the active id no longer matches any account, the session simply
    /// has no active account.
    pub fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }

    /// Select the active account by id.
    pub fn set_active(&mut self, account_id: impl Into<String>) {
        self.active_account_id = Some(account_id.into());
    }

    /// Sign out: clears the active selection, keeps the account list.
    pub fn sign_out(&mut self) {
        self.active_account_id = None;
    }

    /// The currently active account, if an account with the active id
    /// exists.
    #[must_use]
    pub fn active_account(&self) -> Option<&Account> {
        let id = self.active_account_id.as_deref()?;
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Resolve the active account's role.
    ///
    /// Embedded roles are returned directly; referenced roles go through
    /// `directory`. An unresolved identifier is treated as "no role" and
    /// logged, never an error.
    #[must_use]
    pub fn active_role<'a>(&'a self, directory: &'a RoleDirectory) -> Option<&'a Role> {
        match self.active_account()?.role.as_ref()? {
            RoleRef::Embedded(role) => Some(role),
            RoleRef::Id(role_id) => {
                let resolved = directory.get(role_id);
                if resolved.is_none() {
                    warn!(role_id = %role_id, "active account references unknown role, treating as no role");
                }
                resolved
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn no_active_selection_means_no_account() {
        let mut store = SessionStore::new();
        store.set_accounts(vec![Account::without_role("alice")]);
        assert!(store.active_account().is_none());
    }

    #[test]
    fn active_id_without_matching_account_is_absent() {
        let mut store = SessionStore::new();
        store.set_active("nobody");
        assert!(store.active_account().is_none());
    }

    #[test]
    fn embedded_role_resolves_directly() {
        let mut store = SessionStore::new();
        store.set_accounts(vec![Account::with_role(
            "alice",
            Role::new("editor", "Editor", ["documents:*"]),
        )]);
        store.set_active("alice");

        let directory = RoleDirectory::new();
        let role = store.active_role(&directory).unwrap();
        assert_eq!(role.id, "editor");
    }

    #[test]
    fn referenced_role_resolves_through_directory() {
        let mut directory = RoleDirectory::new();
        directory.register(Role::new("viewer", "Viewer", ["documents:read"]));

        let mut store = SessionStore::new();
        store.set_accounts(vec![Account::with_role_id("bob", "viewer")]);
        store.set_active("bob");

        let role = store.active_role(&directory).unwrap();
        assert_eq!(role.name, "Viewer");
    }

    #[test]
    fn unresolved_role_id_degrades_to_no_role() {
        let mut store = SessionStore::new();
        store.set_accounts(vec![Account::with_role_id("bob", "ghost-role")]);
        store.set_active("bob");

        assert!(store.active_role(&RoleDirectory::new()).is_none());
    }

    #[test]
    fn sign_out_clears_the_active_account() {
        let mut store = SessionStore::new();
        store.set_accounts(vec![Account::without_role("alice")]);
        store.set_active("alice");
        assert!(store.active_account().is_some());

        store.sign_out();
        assert!(store.active_account().is_none());
    }

    #[test]
    fn role_ref_accepts_bare_string_and_object() {
        let by_id: Account = serde_json::from_str(r#"{"id": "bob", "role": "viewer"}"#).unwrap();
        assert_eq!(by_id.role, Some(RoleRef::Id("viewer".to_owned())));

        let embedded: Account = serde_json::from_str(
            r#"{"id": "alice", "role": {"id": "editor", "name": "Editor", "permissions": ["documents:*"]}}"#,
        )
        .unwrap();
        assert!(matches!(
            embedded.role,
            Some(RoleRef::Embedded(ref role)) if role.id == "editor"
        ));
    }
}
