//! Bounded keep-alive cache of rendered pages.
//!
//! The richer variant of the page-state cache: for each route the
//! navigation layer considers "open" (an open tab, typically), it retains
//! a cloned snapshot of the rendered content plus the scroll position, so
//! switching back re-mounts the page instead of rebuilding it.
//!
//! Retention is governed by two independent rules:
//!
//! - membership: entries whose key leaves the open-route set are purged
//!   eagerly on [`sync_open_routes`](KeepAliveCache::sync_open_routes),
//!   regardless of the size bound;
//! - capacity: at most [`DEFAULT_CAPACITY`] entries survive; beyond that,
//!   the oldest-inserted entries are evicted first.
//!
//! Eviction order is first-visit insertion order, deliberately not
//! recency of access: reads never reorder, and re-inserting an existing
//! key updates it in place without re-bumping its position.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::debug;

use crate::route::RouteKey;

/// Maximum number of pages kept alive by default.
pub const DEFAULT_CAPACITY: usize = 10;

/// A retained page: the caller's cloned rendered content plus the scroll
/// position it was captured with.
#[derive(Debug, Clone)]
pub struct CachedPage<S> {
    /// Cloned rendered content. Opaque to this crate.
    pub snapshot: S,
    /// Scroll position at capture time.
    pub scroll_offset: i64,
    /// When the entry was last written. Observability only.
    pub cached_at: DateTime<Utc>,
}

/// Insertion-ordered, capacity-bounded cache of rendered pages.
///
/// `S` is whatever the host uses to represent a cloned page — this crate
/// only ever stores and returns it.
#[derive(Debug)]
pub struct KeepAliveCache<S> {
    pages: IndexMap<RouteKey, CachedPage<S>>,
    capacity: usize,
}

impl<S> KeepAliveCache<S> {
    /// Cache bounded at [`DEFAULT_CAPACITY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Cache bounded at `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pages: IndexMap::new(),
            capacity,
        }
    }

    /// Insert or update the entry for `key`, then evict oldest-inserted
    /// entries while over capacity.
    ///
    /// An update keeps the key's original insertion position — revisiting
    /// a route does not protect it from eviction.
    pub fn insert(&mut self, key: RouteKey, snapshot: S, scroll_offset: i64) {
        let page = CachedPage {
            snapshot,
            scroll_offset,
            cached_at: Utc::now(),
        };
        // IndexMap::insert preserves the existing position on update.
        self.pages.insert(key, page);
        self.evict_over_capacity();
    }

    /// Retained page for `key`, or `None`. Reads do not affect eviction
    /// order.
    #[must_use]
    pub fn get(&self, key: &RouteKey) -> Option<&CachedPage<S>> {
        self.pages.get(key)
    }

    /// Remove and return the entry for `key`, preserving the order of the
    /// remaining entries.
    pub fn remove(&mut self, key: &RouteKey) -> Option<CachedPage<S>> {
        self.pages.shift_remove(key)
    }

    /// Reconcile with the navigation layer's open-route set: purge every
    /// entry whose key is no longer open, then re-apply the capacity
    /// bound. Called on every change to the set.
    pub fn sync_open_routes(&mut self, open: &HashSet<RouteKey>) {
        let before = self.pages.len();
        self.pages.retain(|key, _| open.contains(key));
        let purged = before - self.pages.len();
        if purged > 0 {
            debug!(purged, remaining = self.pages.len(), "closed routes purged from keep-alive cache");
        }
        self.evict_over_capacity();
    }

    /// Drop every retained page.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Number of retained pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no pages are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The configured size bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained route keys, oldest-inserted first.
    pub fn keys(&self) -> impl Iterator<Item = &RouteKey> {
        self.pages.keys()
    }

    fn evict_over_capacity(&mut self) {
        while self.pages.len() > self.capacity {
            if let Some((key, _)) = self.pages.shift_remove_index(0) {
                debug!(route = %key, "oldest keep-alive entry evicted");
            }
        }
    }
}

impl<S> Default for KeepAliveCache<S> {
    fn default() -> Self {
        Self::new()
    }
}
