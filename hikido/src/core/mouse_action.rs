//! Dragging windows with the mouse while holding the hyper chord.
//!
//! Holding hyper moves the window under the pointer, hyper+shift resizes it
//! around its centre. Releasing the chord ends the action and disables the
//! feature until it is toggled again.

use hikido_ipc::{Point, Rect};

use super::frame_cache::FrameCache;
use super::placement;
use crate::hotkey::Modifiers;
use crate::platform::{window_screen_frame, WindowId, WindowManipulator, WindowSystem};

pub const DEFAULT_STICKY_THRESHOLD: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Move,
    Resize,
}

/// An in-flight drag, anchored where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveAction {
    pub kind: ActionKind,
    pub window: WindowId,
    /// Window frame at the anchor point
    pub frame: Rect,
    /// Visible frame of the window's screen when the drag started
    pub screen: Rect,
    pub origin: Point,
}

#[derive(Debug)]
pub struct MouseAction {
    enabled: bool,
    active: Option<ActiveAction>,
    hyper: Modifiers,
    sticky_threshold: u32,
}

impl MouseAction {
    pub fn new(hyper: Modifiers, sticky_threshold: u32) -> Self {
        Self {
            enabled: false,
            active: None,
            hyper,
            sticky_threshold,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        tracing::info!("Mouse action enabled: {}", self.enabled);
        self.enabled
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<&ActiveAction> {
        self.active.as_ref()
    }

    fn kind_for(&self, modifiers: Modifiers) -> Option<ActionKind> {
        if !self.enabled {
            return None;
        }
        if modifiers == self.hyper {
            Some(ActionKind::Move)
        } else if modifiers == self.hyper.with_shift() {
            Some(ActionKind::Resize)
        } else {
            None
        }
    }

    /// Handles one pointer movement. Returns whether a window was changed.
    pub fn handle_mouse_moved<S: WindowSystem, M: WindowManipulator>(
        &mut self,
        cache: &mut FrameCache,
        ws: &S,
        wm: &M,
        point: Point,
        modifiers: Modifiers,
    ) -> bool {
        let Some(kind) = self.kind_for(modifiers) else {
            if self.enabled {
                tracing::info!("Mouse action released");
            }
            self.enabled = false;
            self.active = None;
            return false;
        };

        let action = match self.active {
            None => {
                let Some(window) = ws.window_at(point) else {
                    tracing::debug!("No window under ({}, {})", point.x, point.y);
                    return false;
                };
                let (Some(frame), Some(screen)) =
                    (ws.window_frame(window), window_screen_frame(ws, window))
                else {
                    return false;
                };
                tracing::debug!("Mouse {:?} started on window {}", kind, window);
                ActiveAction {
                    kind,
                    window,
                    frame,
                    screen,
                    origin: point,
                }
            }
            // Switching mode re-anchors on the window's current frame
            Some(previous) if previous.kind != kind => ActiveAction {
                kind,
                frame: ws.window_frame(previous.window).unwrap_or(previous.frame),
                origin: point,
                ..previous
            },
            Some(previous) => previous,
        };
        self.active = Some(action);

        let dx = action.origin.x.saturating_sub(point.x);
        let dy = action.origin.y.saturating_sub(point.y);
        if dx == 0 && dy == 0 {
            return false;
        }

        match kind {
            ActionKind::Move => {
                if point.y == 0 {
                    // Sliding along the top edge must not re-snapshot the maximized frame
                    if placement::is_maximized(cache, ws, action.window) {
                        return false;
                    }
                    return placement::maximize(cache, ws, wm, action.window);
                }
                let moved = Point::new(
                    action.frame.x.saturating_sub(dx),
                    action.frame.y.saturating_sub(dy),
                );
                let target = snap_to_edges(moved, action.frame, action.screen, self.sticky_threshold);
                wm.set_window_top_left(action.window, target)
            }
            ActionKind::Resize => {
                let frame = resize_around_center(action.frame, action.screen, dx, dy);
                wm.set_window_frame(action.window, frame)
            }
        }
    }
}

/// Pulls a window's top-left onto the screen edges it is within `threshold` of.
pub fn snap_to_edges(top_left: Point, frame: Rect, screen: Rect, threshold: u32) -> Point {
    let near = |a: i32, b: i32| a.abs_diff(b) <= threshold;
    let mut snapped = top_left;

    if near(screen.x, snapped.x) {
        snapped.x = screen.x;
    }
    let right = screen.right().saturating_sub_unsigned(frame.width);
    if near(right, snapped.x) {
        snapped.x = right;
    }
    if near(screen.y, snapped.y) {
        snapped.y = screen.y;
    }
    let bottom = screen.bottom().saturating_sub_unsigned(frame.height);
    if near(bottom, snapped.y) {
        snapped.y = bottom;
    }
    snapped
}

/// Grows or shrinks `frame` by the pointer delta on both sides, keeping its
/// origin on screen.
pub fn resize_around_center(frame: Rect, screen: Rect, dx: i32, dy: i32) -> Rect {
    let grow = |size: u32, delta: i32| (size as i64 - 2 * delta as i64).clamp(1, u32::MAX as i64) as u32;
    Rect::new(
        frame.x.saturating_add(dx).max(screen.x),
        frame.y.saturating_add(dy).max(screen.y),
        grow(frame.width, dx),
        grow(frame.height, dy),
    )
}
