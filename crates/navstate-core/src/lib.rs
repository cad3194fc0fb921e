//! Session-scoped page-state caching for a client shell.
//!
//! This crate keeps per-route UI state alive for the duration of a
//! session so that navigating away and back reproduces what the user
//! left: scroll position, in-progress form input, and arbitrary
//! route-local state. Nothing survives a reload — the stores are created
//! once per session and intentionally never persisted.
//!
//! Two stores are provided:
//!
//! - [`PageStateCache`] — unbounded per-route snapshots ([`PageState`]):
//!   scroll offset, form drafts, custom state. Merge-on-write,
//!   absence-on-miss.
//! - [`KeepAliveCache`] — the bounded variant that additionally retains
//!   cloned rendered content for routes in the navigation layer's open
//!   set, evicting oldest-first past a fixed capacity.
//!
//! [`RouteLifecycle`] ties the page-state cache to explicit route
//! enter/scroll/leave events, and [`ScrollSync`] handles throttled scroll
//! saves plus the deferred one-frame restore. Host capabilities (the
//! scrollable surface, after-next-paint scheduling) are injected behind
//! the [`Viewport`] and [`FrameScheduler`] traits, so no UI framework is
//! referenced anywhere in this crate.

pub mod keep_alive;
pub mod page_state;
pub mod route;
pub mod scroll;

pub use keep_alive::{CachedPage, KeepAliveCache};
pub use page_state::{PageState, PageStateCache, PageStateUpdate};
pub use route::{RouteKey, RouteLifecycle};
pub use scroll::{FrameScheduler, ScrollSync, Viewport};
