//! Scroll position save and restore.
//!
//! Two host capabilities are injected behind traits so this module never
//! touches a UI framework directly:
//!
//! - [`Viewport`] — the scrollable surface (read the offset, set it).
//! - [`FrameScheduler`] — runs a single-shot callback after the next
//!   render frame, guaranteeing the content being scrolled exists in the
//!   rendered tree before the restore fires.
//!
//! Saves are throttled: at most one write per [`SAVE_THROTTLE`] of
//! continuous scrolling, with the last observed value held pending and
//! flushed on route-leave so the final position is never lost. After a
//! programmatic restore, incoming scroll events are suppressed for
//! [`RESTORE_SUPPRESS`] so the restore itself is not mistaken for a
//! user-driven scroll and re-saved (which would feed back on the next
//! visit).

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::page_state::{PageStateCache, PageStateUpdate};
use crate::route::RouteKey;

/// Minimum interval between scroll-offset writes while scrolling.
pub const SAVE_THROTTLE: Duration = Duration::from_millis(100);

/// Window after a programmatic restore during which scroll events are
/// dropped. Covers the frame delay between scheduling and the restore
/// actually firing.
pub const RESTORE_SUPPRESS: Duration = Duration::from_millis(250);

/// The host's scrollable surface.
pub trait Viewport {
    /// Current vertical scroll position.
    fn scroll_offset(&self) -> i64;

    /// Scroll to the given vertical position.
    fn scroll_to(&mut self, offset: i64);
}

/// Host-provided single-shot deferral until after the next render frame.
pub trait FrameScheduler {
    /// Run `callback` against the viewport once the next frame has
    /// painted.
    fn defer(&mut self, callback: Box<dyn FnOnce(&mut dyn Viewport)>);
}

/// Throttled save / deferred restore state machine.
///
/// Methods come in pairs: the plain form stamps `Instant::now()`, the
/// `_at` form takes an explicit instant so throttle and suppression
/// windows are testable without sleeping.
#[derive(Debug, Default)]
pub struct ScrollSync {
    last_save: Option<Instant>,
    pending: Option<(RouteKey, i64)>,
    suppress_until: Option<Instant>,
}

impl ScrollSync {
    /// Fresh state: no pending save, no suppression window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scroll event for `key`.
    ///
    /// Writes through to the cache at most once per [`SAVE_THROTTLE`];
    /// events inside the window update the pending value instead (last
    /// value wins). Events inside the post-restore suppression window are
    /// dropped entirely.
    pub fn record_scroll(&mut self, cache: &mut PageStateCache, key: &RouteKey, offset: i64) {
        self.record_scroll_at(cache, key, offset, Instant::now());
    }

    /// [`record_scroll`](Self::record_scroll) with an explicit clock
    /// reading.
    pub fn record_scroll_at(
        &mut self,
        cache: &mut PageStateCache,
        key: &RouteKey,
        offset: i64,
        now: Instant,
    ) {
        if let Some(until) = self.suppress_until {
            if now < until {
                trace!(route = %key, offset, "scroll event suppressed after restore");
                return;
            }
            self.suppress_until = None;
        }

        if let Some(last) = self.last_save {
            if now.duration_since(last) < SAVE_THROTTLE {
                self.pending = Some((key.clone(), offset));
                return;
            }
        }

        cache.set(key, PageStateUpdate::new().scroll_offset(offset));
        self.last_save = Some(now);
        self.pending = None;
        trace!(route = %key, offset, "scroll offset saved");
    }

    /// Write any pending throttled value. Called on route-leave so the
    /// last observed position inside a throttle window is not lost.
    pub fn flush(&mut self, cache: &mut PageStateCache) {
        if let Some((key, offset)) = self.pending.take() {
            cache.set(&key, PageStateUpdate::new().scroll_offset(offset));
            trace!(route = %key, offset, "pending scroll offset flushed");
        }
    }

    /// Schedule a scroll restore for `key` on the next render frame.
    ///
    /// Does nothing when there is no stored entry or the stored offset is
    /// not positive. Opens the suppression window immediately, so scroll
    /// events emitted by the deferred restore are ignored.
    pub fn restore(
        &mut self,
        cache: &PageStateCache,
        key: &RouteKey,
        scheduler: &mut dyn FrameScheduler,
    ) {
        self.restore_at(cache, key, scheduler, Instant::now());
    }

    /// [`restore`](Self::restore) with an explicit clock reading.
    pub fn restore_at(
        &mut self,
        cache: &PageStateCache,
        key: &RouteKey,
        scheduler: &mut dyn FrameScheduler,
        now: Instant,
    ) {
        let Some(state) = cache.get(key) else {
            return;
        };
        if state.scroll_offset <= 0 {
            return;
        }

        let offset = state.scroll_offset;
        self.suppress_until = Some(now + RESTORE_SUPPRESS);
        debug!(route = %key, offset, "scroll restore scheduled");
        scheduler.defer(Box::new(move |viewport| viewport.scroll_to(offset)));
    }

    /// Flush any pending save and record the viewport's current offset.
    /// Called on route-leave; also resets the throttle so the next route's
    /// first scroll event saves immediately.
    pub fn save_on_leave(
        &mut self,
        cache: &mut PageStateCache,
        key: &RouteKey,
        viewport: &dyn Viewport,
    ) {
        self.flush(cache);
        cache.set(
            key,
            PageStateUpdate::new().scroll_offset(viewport.scroll_offset()),
        );
        self.last_save = None;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[derive(Default)]
    struct TestViewport {
        offset: i64,
        scroll_calls: usize,
    }

    impl Viewport for TestViewport {
        fn scroll_offset(&self) -> i64 {
            self.offset
        }

        fn scroll_to(&mut self, offset: i64) {
            self.offset = offset;
            self.scroll_calls += 1;
        }
    }

    /// Collects deferred callbacks; `run_frame` plays them against a
    /// viewport, standing in for the host's next paint.
    #[derive(Default)]
    struct ManualFrames {
        callbacks: Vec<Box<dyn FnOnce(&mut dyn Viewport)>>,
    }

    impl ManualFrames {
        fn run_frame(&mut self, viewport: &mut TestViewport) {
            for callback in self.callbacks.drain(..) {
                callback(viewport);
            }
        }
    }

    impl FrameScheduler for ManualFrames {
        fn defer(&mut self, callback: Box<dyn FnOnce(&mut dyn Viewport)>) {
            self.callbacks.push(callback);
        }
    }

    fn saved_offset(cache: &PageStateCache, key: &RouteKey) -> Option<i64> {
        cache.get(key).map(|s| s.scroll_offset)
    }

    #[test]
    fn first_scroll_event_saves_immediately() {
        let mut cache = PageStateCache::new();
        let mut sync = ScrollSync::new();
        let key = RouteKey::new("/docs");

        sync.record_scroll_at(&mut cache, &key, 50, Instant::now());
        assert_eq!(saved_offset(&cache, &key), Some(50));
    }

    #[test]
    fn events_inside_throttle_window_coalesce() {
        let mut cache = PageStateCache::new();
        let mut sync = ScrollSync::new();
        let key = RouteKey::new("/docs");
        let t0 = Instant::now();

        sync.record_scroll_at(&mut cache, &key, 50, t0);
        sync.record_scroll_at(&mut cache, &key, 80, t0 + Duration::from_millis(30));
        sync.record_scroll_at(&mut cache, &key, 110, t0 + Duration::from_millis(60));

        // Only the first event wrote through.
        assert_eq!(saved_offset(&cache, &key), Some(50));

        // The last observed value surfaces on flush.
        sync.flush(&mut cache);
        assert_eq!(saved_offset(&cache, &key), Some(110));
    }

    #[test]
    fn event_after_window_saves_again() {
        let mut cache = PageStateCache::new();
        let mut sync = ScrollSync::new();
        let key = RouteKey::new("/docs");
        let t0 = Instant::now();

        sync.record_scroll_at(&mut cache, &key, 50, t0);
        sync.record_scroll_at(&mut cache, &key, 80, t0 + Duration::from_millis(40));
        sync.record_scroll_at(&mut cache, &key, 200, t0 + SAVE_THROTTLE);

        assert_eq!(saved_offset(&cache, &key), Some(200));
        // The superseded pending value must not resurface.
        sync.flush(&mut cache);
        assert_eq!(saved_offset(&cache, &key), Some(200));
    }

    #[test]
    fn flush_with_nothing_pending_is_a_noop() {
        let mut cache = PageStateCache::new();
        let mut sync = ScrollSync::new();
        sync.flush(&mut cache);
        assert!(cache.is_empty());
    }

    #[test]
    fn restore_defers_until_next_frame() {
        let mut cache = PageStateCache::new();
        let mut sync = ScrollSync::new();
        let mut frames = ManualFrames::default();
        let mut viewport = TestViewport::default();
        let key = RouteKey::new("/docs");

        cache.set(&key, PageStateUpdate::new().scroll_offset(320));
        sync.restore_at(&cache, &key, &mut frames, Instant::now());

        // Nothing happens until the host paints.
        assert_eq!(viewport.offset, 0);
        frames.run_frame(&mut viewport);
        assert_eq!(viewport.offset, 320);
        assert_eq!(viewport.scroll_calls, 1);
    }

    #[test]
    fn restore_skips_zero_offset_and_misses() {
        let mut cache = PageStateCache::new();
        let mut sync = ScrollSync::new();
        let mut frames = ManualFrames::default();

        let at_top = RouteKey::new("/at-top");
        cache.set(&at_top, PageStateUpdate::new().scroll_offset(0));
        sync.restore_at(&cache, &at_top, &mut frames, Instant::now());
        sync.restore_at(&cache, &RouteKey::new("/never-visited"), &mut frames, Instant::now());

        assert!(frames.callbacks.is_empty());
    }

    #[test]
    fn restore_suppresses_immediate_scroll_events() {
        let mut cache = PageStateCache::new();
        let mut sync = ScrollSync::new();
        let mut frames = ManualFrames::default();
        let key = RouteKey::new("/docs");
        let t0 = Instant::now();

        cache.set(&key, PageStateUpdate::new().scroll_offset(320));
        sync.restore_at(&cache, &key, &mut frames, t0);

        // The restore-induced event lands inside the suppression window
        // and must not overwrite the stored offset.
        sync.record_scroll_at(&mut cache, &key, 317, t0 + Duration::from_millis(20));
        assert_eq!(saved_offset(&cache, &key), Some(320));

        // A genuinely later user scroll saves normally.
        sync.record_scroll_at(&mut cache, &key, 500, t0 + RESTORE_SUPPRESS);
        assert_eq!(saved_offset(&cache, &key), Some(500));
    }

    #[test]
    fn save_on_leave_records_viewport_offset() {
        let mut cache = PageStateCache::new();
        let mut sync = ScrollSync::new();
        let key = RouteKey::new("/docs");
        let t0 = Instant::now();

        sync.record_scroll_at(&mut cache, &key, 10, t0);
        sync.record_scroll_at(&mut cache, &key, 90, t0 + Duration::from_millis(20));

        let viewport = TestViewport {
            offset: 130,
            scroll_calls: 0,
        };
        sync.save_on_leave(&mut cache, &key, &viewport);
        assert_eq!(saved_offset(&cache, &key), Some(130));
    }
}
