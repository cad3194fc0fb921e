//! Route keys and the route lifecycle driver.
//!
//! A [`RouteKey`] identifies the slot a page's cached state lives under.
//! It is the route path, optionally suffixed with a caller-chosen sub-key
//! so that multiple independent caches can coexist on one route (e.g. two
//! distinct forms on the same page).
//!
//! [`RouteLifecycle`] is the explicit enter/scroll/leave event pair that a
//! routing layer drives. It owns the page-state cache and the scroll sync
//! state machine, so consumers never wire those two together by hand and
//! never depend on any UI framework's lifecycle model.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::page_state::PageStateCache;
use crate::scroll::{FrameScheduler, ScrollSync, Viewport};

/// Identifier a page state entry is stored under.
///
/// The plain form is the route path (`/documents`). The sub-keyed form
/// appends `#<sub-key>` (`/documents#search-form`) so that independent
/// state on the same route does not collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteKey(String);

impl RouteKey {
    /// Key for a plain route path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Key for a route path plus an independent sub-key.
    #[must_use]
    pub fn with_sub_key(path: &str, sub_key: &str) -> Self {
        Self(format!("{path}#{sub_key}"))
    }

    /// The full key string, including the sub-key suffix if present.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteKey {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for RouteKey {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Drives page-state save and restore from navigation events.
///
/// The routing layer calls [`on_enter`](Self::on_enter) when a route
/// becomes active, [`on_scroll`](Self::on_scroll) on every viewport scroll
/// event, and [`on_leave`](Self::on_leave) just before the route is torn
/// down. Everything else (form drafts, custom state) goes through
/// [`cache_mut`](Self::cache_mut) on the same single store instance.
#[derive(Debug, Default)]
pub struct RouteLifecycle {
    cache: PageStateCache,
    scroll: ScrollSync,
}

impl RouteLifecycle {
    /// Create a lifecycle driver with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route became active: schedule a scroll restore for the next frame
    /// if a previous visit left a positive offset behind.
    pub fn on_enter(&mut self, key: &RouteKey, scheduler: &mut dyn FrameScheduler) {
        self.scroll.restore(&self.cache, key, scheduler);
    }

    /// Viewport scrolled while the route is active. Saves are throttled;
    /// see [`ScrollSync::record_scroll`].
    pub fn on_scroll(&mut self, key: &RouteKey, offset: i64) {
        self.scroll.record_scroll(&mut self.cache, key, offset);
    }

    /// Route is about to be torn down: flush any pending throttled save
    /// and record the viewport's final scroll offset.
    pub fn on_leave(&mut self, key: &RouteKey, viewport: &dyn Viewport) {
        self.scroll.save_on_leave(&mut self.cache, key, viewport);
    }

    /// Full session reset (logout): drop all cached page state.
    pub fn reset(&mut self) {
        self.cache.clear_all();
        self.scroll = ScrollSync::new();
        debug!("route lifecycle reset");
    }

    /// Read access to the underlying page-state cache.
    #[must_use]
    pub fn cache(&self) -> &PageStateCache {
        &self.cache
    }

    /// Write access to the underlying page-state cache.
    pub fn cache_mut(&mut self) -> &mut PageStateCache {
        &mut self.cache
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::page_state::PageStateUpdate;

    struct FixedViewport(i64);

    impl Viewport for FixedViewport {
        fn scroll_offset(&self) -> i64 {
            self.0
        }

        fn scroll_to(&mut self, offset: i64) {
            self.0 = offset;
        }
    }

    #[test]
    fn sub_keyed_routes_are_distinct() {
        let plain = RouteKey::new("/docs");
        let sub = RouteKey::with_sub_key("/docs", "filters");
        assert_ne!(plain, sub);
        assert_eq!(sub.as_str(), "/docs#filters");
    }

    #[test]
    fn display_matches_key_string() {
        let key = RouteKey::with_sub_key("/users", "edit-form");
        assert_eq!(key.to_string(), "/users#edit-form");
    }

    #[test]
    fn leave_records_final_offset() {
        let mut lifecycle = RouteLifecycle::new();
        let key = RouteKey::new("/docs");
        lifecycle.on_leave(&key, &FixedViewport(480));
        assert_eq!(lifecycle.cache().get(&key).unwrap().scroll_offset, 480);
    }

    #[test]
    fn reset_clears_every_entry() {
        let mut lifecycle = RouteLifecycle::new();
        let key = RouteKey::new("/docs");
        lifecycle
            .cache_mut()
            .set(&key, PageStateUpdate::new().scroll_offset(10));
        lifecycle.reset();
        assert!(lifecycle.cache().get(&key).is_none());
        assert!(lifecycle.cache().is_empty());
    }
}
