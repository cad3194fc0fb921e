//! Per-route page-state cache.
//!
//! The cache keeps one [`PageState`] snapshot per [`RouteKey`] for the
//! lifetime of the session: scroll offset, in-progress form drafts, and
//! free-form custom state. Writes shallow-merge into the existing entry
//! (creating it lazily on first write); reads are pure and a miss is an
//! absent result, never an error. Nothing here is persisted — navigating
//! away and back within one session restores the page, a reload starts
//! fresh.
//!
//! Merge rules on [`set`](PageStateCache::set):
//!
//! - `scroll_offset` replaces when the update carries one.
//! - `custom_state` entries merge key-by-key; a provided key replaces that
//!   key's whole value.
//! - each provided `form_drafts` group replaces that group's full value
//!   object (a form always writes its complete current values).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::route::RouteKey;

/// Snapshot of a route's ephemeral UI state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageState {
    /// Vertical scroll position recorded when the route was left.
    pub scroll_offset: i64,
    /// Last known form values, keyed by field-group name. Present only for
    /// forms that opted into caching.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub form_drafts: HashMap<String, Value>,
    /// Free-form per-route state.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom_state: HashMap<String, Value>,
    /// Stamped on every write. Observability only — never consulted for
    /// eviction.
    pub last_updated: DateTime<Utc>,
}

impl PageState {
    fn empty(now: DateTime<Utc>) -> Self {
        Self {
            scroll_offset: 0,
            form_drafts: HashMap::new(),
            custom_state: HashMap::new(),
            last_updated: now,
        }
    }
}

/// A partial write, merged into the stored entry by
/// [`PageStateCache::set`].
#[derive(Debug, Clone, Default)]
pub struct PageStateUpdate {
    scroll_offset: Option<i64>,
    form_drafts: HashMap<String, Value>,
    custom_state: HashMap<String, Value>,
}

impl PageStateUpdate {
    /// An update that touches nothing (applying it still stamps
    /// `last_updated`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scroll offset.
    #[must_use]
    pub fn scroll_offset(mut self, offset: i64) -> Self {
        self.scroll_offset = Some(offset);
        self
    }

    /// Replace one form group's full value object.
    #[must_use]
    pub fn form_draft(mut self, group: impl Into<String>, values: Value) -> Self {
        self.form_drafts.insert(group.into(), values);
        self
    }

    /// Merge one custom-state entry.
    #[must_use]
    pub fn custom(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom_state.insert(key.into(), value);
        self
    }
}

/// Session-lifetime store of per-route page state.
///
/// Explicitly constructed and passed to consumers — there is no ambient
/// global instance, which keeps it substitutable in tests. All access
/// happens on the UI thread; no operation fails.
#[derive(Debug, Default)]
pub struct PageStateCache {
    entries: HashMap<RouteKey, PageState>,
}

impl PageStateCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `update` into the entry for `key`, creating the entry on
    /// first write. Always succeeds; subsequent reads observe the merge.
    pub fn set(&mut self, key: &RouteKey, update: PageStateUpdate) {
        let now = Utc::now();
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| PageState::empty(now));

        if let Some(offset) = update.scroll_offset {
            entry.scroll_offset = offset;
        }
        entry.form_drafts.extend(update.form_drafts);
        entry.custom_state.extend(update.custom_state);
        entry.last_updated = now;

        debug!(route = %key, "page state updated");
    }

    /// Current snapshot for `key`, or `None` if never written.
    #[must_use]
    pub fn get(&self, key: &RouteKey) -> Option<&PageState> {
        self.entries.get(key)
    }

    /// Remove the entry for `key`. Idempotent — clearing an absent key is
    /// a no-op.
    pub fn clear(&mut self, key: &RouteKey) {
        if self.entries.remove(key).is_some() {
            debug!(route = %key, "page state cleared");
        }
    }

    /// Empty the cache. Used on full session reset (logout).
    pub fn clear_all(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        debug!(entries = dropped, "page state cache emptied");
    }

    /// Number of routes with cached state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Route keys with cached state, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &RouteKey> {
        self.entries.keys()
    }

    /// Replace one form group's draft values for `key`.
    ///
    /// Replace semantics per group: the form writes its complete current
    /// value object on every change, so partial field updates never leave
    /// stale siblings behind.
    pub fn set_form_draft(&mut self, key: &RouteKey, group: impl Into<String>, values: Value) {
        self.set(key, PageStateUpdate::new().form_draft(group, values));
    }

    /// Last known draft values for a form group, or `None` if the form
    /// never wrote any.
    #[must_use]
    pub fn form_draft(&self, key: &RouteKey, group: &str) -> Option<&Value> {
        self.entries.get(key)?.form_drafts.get(group)
    }

    /// Draft values for a form group, falling back to the caller-supplied
    /// defaults when absent. This is the initial-value source a mounting
    /// form reads.
    #[must_use]
    pub fn form_draft_or(&self, key: &RouteKey, group: &str, default: Value) -> Value {
        self.form_draft(key, group).cloned().unwrap_or(default)
    }
}
