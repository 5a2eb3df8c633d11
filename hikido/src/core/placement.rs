//! Frame placement and the maximize/restore toggle.
//!
//! Every successful frame change made through [`set_frame`] drops the window's
//! cached pre-maximize frames, so a later toggle never restores a stale frame.

use hikido_ipc::Rect;

use super::frame::frame_ratio;
use super::frame_cache::{CachedFrames, FrameCache, FrameSnapshot};
use crate::platform::{window_screen_frame, WindowId, WindowManipulator, WindowSystem};

/// Applies the first candidate that is present and differs from the window's
/// current frame. Returns whether a frame was applied.
///
/// Calling this repeatedly with the same list walks through the candidates,
/// since the one just applied is skipped on the next call.
pub fn set_frame<S: WindowSystem, M: WindowManipulator>(
    cache: &mut FrameCache,
    ws: &S,
    wm: &M,
    window_id: WindowId,
    candidates: &[Option<Rect>],
) -> bool {
    for frame in candidates.iter().flatten() {
        let Some(current) = ws.window_frame(window_id) else {
            tracing::debug!("Window {} has no frame, skipping placement", window_id);
            return false;
        };
        tracing::debug!("Comparing window {} frame {} with {}", window_id, current, frame);

        if current == *frame {
            continue;
        }
        return apply_frame(cache, wm, window_id, *frame);
    }
    false
}

/// [`set_frame`] on the focused window. Without a focused window nothing happens.
pub fn set_focused_frame<S: WindowSystem, M: WindowManipulator>(
    cache: &mut FrameCache,
    ws: &S,
    wm: &M,
    candidates: &[Option<Rect>],
) -> bool {
    let Some(window_id) = ws.focused_window() else {
        tracing::debug!("No focused window");
        return false;
    };
    set_frame(cache, ws, wm, window_id, candidates)
}

fn apply_frame<M: WindowManipulator>(
    cache: &mut FrameCache,
    wm: &M,
    window_id: WindowId,
    frame: Rect,
) -> bool {
    let ok = wm.set_window_frame(window_id, frame);
    if ok {
        cache.remove(window_id);
    }
    ok
}

/// Maximizes the window, remembering its frame before and after so the
/// maximize can be undone by [`toggle_maximized`].
pub fn maximize<S: WindowSystem, M: WindowManipulator>(
    cache: &mut FrameCache,
    ws: &S,
    wm: &M,
    window_id: WindowId,
) -> bool {
    let Some(previous) = snapshot(ws, window_id) else {
        tracing::debug!("Window {} has no screen, not maximizing", window_id);
        return false;
    };

    let ok = wm.maximize_window(window_id);
    let maximized = snapshot(ws, window_id);

    cache.insert(
        window_id,
        CachedFrames {
            screen: previous.screen,
            window: previous.window,
            maximized,
        },
    );
    tracing::debug!("Maximized window {} from {}", window_id, previous.window);
    ok
}

/// True only if the window and its screen look exactly as they did right after
/// the last [`maximize`].
pub fn is_maximized<S: WindowSystem>(cache: &FrameCache, ws: &S, window_id: WindowId) -> bool {
    let Some(maximized) = cache.get(window_id).and_then(|c| c.maximized) else {
        return false;
    };
    let Some(current) = snapshot(ws, window_id) else {
        return false;
    };
    tracing::debug!(
        "Window {} frame {} vs maximized {}",
        window_id,
        current.window,
        maximized.window
    );
    current == maximized
}

/// Frame to restore: the cached pre-maximize frame (or the current one when
/// nothing is cached), moved onto the window's current screen.
pub fn unmaximized_frame<S: WindowSystem>(
    cache: &FrameCache,
    ws: &S,
    window_id: WindowId,
) -> Option<Rect> {
    let current = snapshot(ws, window_id)?;
    let previous = cache
        .get(window_id)
        .map(CachedFrames::previous)
        .unwrap_or(current);
    Some(frame_ratio(previous.screen, current.screen)(previous.window))
}

pub fn toggle_maximized<S: WindowSystem, M: WindowManipulator>(
    cache: &mut FrameCache,
    ws: &S,
    wm: &M,
    window_id: WindowId,
) -> bool {
    if is_maximized(cache, ws, window_id) {
        let restore = unmaximized_frame(cache, ws, window_id);
        return set_frame(cache, ws, wm, window_id, &[restore]);
    }
    maximize(cache, ws, wm, window_id)
}

fn snapshot<S: WindowSystem>(ws: &S, window_id: WindowId) -> Option<FrameSnapshot> {
    Some(FrameSnapshot {
        screen: window_screen_frame(ws, window_id)?,
        window: ws.window_frame(window_id)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::fixtures::{create_test_window, dual_screen_desktop, single_screen_desktop};
    use crate::desktop::Desktop;

    fn setup_desktop() -> Desktop {
        single_screen_desktop()
            .with_window(create_test_window(100, 1000, "Safari", 0, 0, 800, 600))
            .with_window(create_test_window(101, 1001, "Terminal", 960, 25, 960, 1055))
            .with_focused(Some(100))
    }

    /// Host that refuses to resize or maximize, as when an app enforces its own size.
    struct RejectingHost<'a>(&'a Desktop);

    impl WindowManipulator for RejectingHost<'_> {
        fn set_window_frame(&self, window_id: WindowId, frame: Rect) -> bool {
            tracing::debug!("Rejecting frame {} for window {}", frame, window_id);
            false
        }

        fn set_window_top_left(&self, window_id: WindowId, point: hikido_ipc::Point) -> bool {
            self.0.set_window_top_left(window_id, point)
        }

        fn maximize_window(&self, window_id: WindowId) -> bool {
            tracing::debug!("Rejecting maximize for window {}", window_id);
            false
        }

        fn set_fullscreen(&self, window_id: WindowId, fullscreen: bool) -> bool {
            self.0.set_fullscreen(window_id, fullscreen)
        }

        fn focus_window(&self, window_id: WindowId) -> bool {
            self.0.focus_window(window_id)
        }

        fn minimize_window(&self, window_id: WindowId) -> bool {
            self.0.minimize_window(window_id)
        }

        fn hide_app(&self, pid: i32) -> bool {
            self.0.hide_app(pid)
        }
    }

    #[test]
    fn test_set_frame_skips_current_frame() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();

        let changed = set_frame(
            &mut cache,
            &desktop,
            &desktop,
            100,
            &[
                Some(Rect::new(0, 0, 800, 600)),
                Some(Rect::new(800, 0, 800, 600)),
            ],
        );

        assert!(changed);
        assert_eq!(desktop.window_frame(100), Some(Rect::new(800, 0, 800, 600)));
        assert_eq!(desktop.frame_changes(), 1);
    }

    #[test]
    fn test_set_frame_applies_at_most_one_candidate() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();

        set_frame(
            &mut cache,
            &desktop,
            &desktop,
            100,
            &[
                Some(Rect::new(10, 10, 100, 100)),
                Some(Rect::new(20, 20, 100, 100)),
            ],
        );

        assert_eq!(desktop.frame_changes(), 1);
        assert_eq!(desktop.window_frame(100), Some(Rect::new(10, 10, 100, 100)));
    }

    #[test]
    fn test_set_frame_skips_missing_candidates() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();

        let changed = set_frame(
            &mut cache,
            &desktop,
            &desktop,
            100,
            &[None, Some(Rect::new(0, 25, 960, 1055))],
        );

        assert!(changed);
        assert_eq!(desktop.window_frame(100), Some(Rect::new(0, 25, 960, 1055)));
    }

    #[test]
    fn test_set_frame_no_change_when_all_equal_or_missing() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();

        let changed = set_frame(
            &mut cache,
            &desktop,
            &desktop,
            100,
            &[None, Some(Rect::new(0, 0, 800, 600)), None],
        );

        assert!(!changed);
        assert_eq!(desktop.frame_changes(), 0);
        assert!(!set_frame(&mut cache, &desktop, &desktop, 100, &[]));
    }

    #[test]
    fn test_set_frame_cycles_through_candidates() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();
        let candidates = [
            Some(Rect::new(0, 25, 960, 1055)),
            Some(Rect::new(0, 25, 640, 1055)),
        ];

        set_frame(&mut cache, &desktop, &desktop, 100, &candidates);
        assert_eq!(desktop.window_frame(100), candidates[0]);
        set_frame(&mut cache, &desktop, &desktop, 100, &candidates);
        assert_eq!(desktop.window_frame(100), candidates[1]);
        set_frame(&mut cache, &desktop, &desktop, 100, &candidates);
        assert_eq!(desktop.window_frame(100), candidates[0]);
    }

    #[test]
    fn test_set_frame_unknown_window() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();
        assert!(!set_frame(
            &mut cache,
            &desktop,
            &desktop,
            999,
            &[Some(Rect::new(0, 0, 10, 10))]
        ));
    }

    #[test]
    fn test_set_focused_frame_without_focus() {
        let desktop = setup_desktop().with_focused(None);
        let mut cache = FrameCache::new();
        assert!(!set_focused_frame(
            &mut cache,
            &desktop,
            &desktop,
            &[Some(Rect::new(0, 0, 10, 10))]
        ));
        assert_eq!(desktop.frame_changes(), 0);
    }

    #[test]
    fn test_set_focused_frame_targets_focused_window() {
        let desktop = setup_desktop().with_focused(Some(101));
        let mut cache = FrameCache::new();
        assert!(set_focused_frame(
            &mut cache,
            &desktop,
            &desktop,
            &[Some(Rect::new(0, 25, 960, 1055))]
        ));
        assert_eq!(desktop.window_frame(101), Some(Rect::new(0, 25, 960, 1055)));
        assert_eq!(desktop.window_frame(100), Some(Rect::new(0, 0, 800, 600)));
    }

    #[test]
    fn test_maximize_records_both_snapshots() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();

        assert!(maximize(&mut cache, &desktop, &desktop, 100));

        let cached = cache.get(100).copied().unwrap();
        assert_eq!(cached.window, Rect::new(0, 0, 800, 600));
        assert_eq!(cached.screen, Rect::new(0, 25, 1920, 1055));
        assert_eq!(
            cached.maximized,
            Some(FrameSnapshot {
                screen: Rect::new(0, 25, 1920, 1055),
                window: Rect::new(0, 25, 1920, 1055),
            })
        );
        assert!(is_maximized(&cache, &desktop, 100));
    }

    #[test]
    fn test_rejected_frame_keeps_cache_entry() {
        let desktop = setup_desktop();
        let host = RejectingHost(&desktop);
        let mut cache = FrameCache::new();
        maximize(&mut cache, &desktop, &desktop, 100);

        let changed = set_frame(
            &mut cache,
            &desktop,
            &host,
            100,
            &[Some(Rect::new(0, 25, 960, 1055))],
        );

        assert!(!changed);
        assert!(cache.contains(100));
        assert!(is_maximized(&cache, &desktop, 100));
        assert_eq!(desktop.window_frame(100), Some(Rect::new(0, 25, 1920, 1055)));
    }

    #[test]
    fn test_rejected_maximize_is_recorded_and_toggle_is_noop() {
        let desktop = setup_desktop();
        let host = RejectingHost(&desktop);
        let mut cache = FrameCache::new();

        assert!(!maximize(&mut cache, &desktop, &host, 100));
        let cached = cache.get(100).copied().unwrap();
        assert_eq!(cached.window, Rect::new(0, 0, 800, 600));
        assert_eq!(cached.maximized.map(|m| m.window), Some(Rect::new(0, 0, 800, 600)));

        // The unchanged frame reads as maximized, and restoring it changes nothing
        assert!(!toggle_maximized(&mut cache, &desktop, &desktop, 100));
        assert_eq!(desktop.window_frame(100), Some(Rect::new(0, 0, 800, 600)));
        assert_eq!(desktop.frame_changes(), 0);
        assert!(cache.contains(100));
    }

    #[test]
    fn test_is_maximized_false_without_cache() {
        let desktop = setup_desktop();
        let cache = FrameCache::new();
        desktop.maximize_window(100);
        assert!(!is_maximized(&cache, &desktop, 100));
    }

    #[test]
    fn test_is_maximized_false_after_manual_move() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();
        maximize(&mut cache, &desktop, &desktop, 100);

        desktop.move_window(100, Rect::new(0, 25, 1900, 1055));
        assert!(!is_maximized(&cache, &desktop, 100));
    }

    #[test]
    fn test_toggle_maximized_twice_restores_exact_frame() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();

        assert!(toggle_maximized(&mut cache, &desktop, &desktop, 100));
        assert_eq!(desktop.window_frame(100), Some(Rect::new(0, 25, 1920, 1055)));

        assert!(toggle_maximized(&mut cache, &desktop, &desktop, 100));
        assert_eq!(desktop.window_frame(100), Some(Rect::new(0, 0, 800, 600)));
        // Restoring goes through set_frame, which drops the entry
        assert!(!cache.contains(100));
    }

    #[test]
    fn test_toggle_maximized_after_manual_move_maximizes_again() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();
        toggle_maximized(&mut cache, &desktop, &desktop, 100);

        desktop.move_window(100, Rect::new(50, 50, 700, 500));
        toggle_maximized(&mut cache, &desktop, &desktop, 100);

        assert_eq!(desktop.window_frame(100), Some(Rect::new(0, 25, 1920, 1055)));
        assert_eq!(cache.get(100).map(|c| c.window), Some(Rect::new(50, 50, 700, 500)));
    }

    #[test]
    fn test_set_frame_invalidates_cache() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();
        maximize(&mut cache, &desktop, &desktop, 100);
        assert!(cache.contains(100));

        set_frame(
            &mut cache,
            &desktop,
            &desktop,
            100,
            &[Some(Rect::new(0, 25, 960, 1055))],
        );
        assert!(!cache.contains(100));
    }

    #[test]
    fn test_closed_window_id_reuse_is_not_maximized() {
        let desktop = setup_desktop();
        let mut cache = FrameCache::new();
        maximize(&mut cache, &desktop, &desktop, 100);

        desktop.close_window(100);
        cache.remove(100);

        desktop.open_window(create_test_window(100, 1005, "Preview", 0, 25, 1920, 1055));
        assert!(!is_maximized(&cache, &desktop, 100));
    }

    #[test]
    fn test_unmaximized_frame_scales_across_screens() {
        let desktop = dual_screen_desktop()
            .with_window(create_test_window(100, 1000, "Safari", 0, 25, 960, 1055))
            .with_focused(Some(100));
        let mut cache = FrameCache::new();
        maximize(&mut cache, &desktop, &desktop, 100);

        // The maximized window is dragged to the second screen
        desktop.move_window(100, Rect::new(1920, 0, 1280, 800));

        assert_eq!(
            unmaximized_frame(&cache, &desktop, 100),
            Some(Rect::new(1920, 0, 640, 800))
        );
    }

    #[test]
    fn test_unmaximized_frame_without_cache_is_current_frame() {
        let desktop = setup_desktop();
        let cache = FrameCache::new();
        assert_eq!(
            unmaximized_frame(&cache, &desktop, 100),
            Some(Rect::new(0, 0, 800, 600))
        );
    }
}
