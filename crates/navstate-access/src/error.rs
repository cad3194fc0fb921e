//! Error types for `navstate-access`.
//!
//! Almost nothing here can fail: missing accounts, missing roles, and
//! unresolved role ids all degrade to an empty permission set. The one
//! exception is a guard evaluated outside its session context — silently
//! rendering unguarded content would be a security bug, so that path
//! fails loudly instead of degrading.

/// Errors from permission-guard evaluation.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// The guard was evaluated with no session context present. This is a
    /// programming error at the call site, not a runtime condition.
    #[error("permission guard evaluated outside a session context")]
    NoSessionContext,
}
