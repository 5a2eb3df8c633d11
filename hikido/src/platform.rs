use hikido_ipc::{Point, Rect, WindowSpec};

pub type WindowId = u32;
pub type ScreenId = u32;

/// Trait for querying windows and screens from the host.
/// This abstraction allows substituting the in-memory desktop in tests.
pub trait WindowSystem {
    fn focused_window(&self) -> Option<WindowId>;
    fn window_frame(&self, window_id: WindowId) -> Option<Rect>;
    fn window_spec(&self, window_id: WindowId) -> Option<WindowSpec>;
    fn window_screen(&self, window_id: WindowId) -> Option<ScreenId>;
    /// Usable area of a screen (menu bar and dock excluded), top-left origin.
    fn screen_visible_frame(&self, screen_id: ScreenId) -> Option<Rect>;
    /// Screen after `screen_id` in host order, wrapping around.
    fn next_screen(&self, screen_id: ScreenId) -> Option<ScreenId>;
    fn window_at(&self, point: Point) -> Option<WindowId>;
    /// Screen whose full frame contains the point.
    fn screen_at(&self, point: Point) -> Option<ScreenId>;
    fn is_fullscreen(&self, window_id: WindowId) -> bool;
    /// Visible windows, most recently focused first.
    fn recent_windows(&self) -> Vec<WindowId>;
    /// Visible windows on one screen, most recently focused first.
    fn visible_windows_on_screen(&self, screen_id: ScreenId) -> Vec<WindowId>;
    fn all_windows(&self) -> Vec<WindowId>;
}

/// Trait for manipulating windows (side effects).
/// Every call is best effort; the return value reports whether the host accepted it.
pub trait WindowManipulator {
    fn set_window_frame(&self, window_id: WindowId, frame: Rect) -> bool;
    fn set_window_top_left(&self, window_id: WindowId, point: Point) -> bool;
    fn maximize_window(&self, window_id: WindowId) -> bool;
    fn set_fullscreen(&self, window_id: WindowId, fullscreen: bool) -> bool;
    fn focus_window(&self, window_id: WindowId) -> bool;
    fn minimize_window(&self, window_id: WindowId) -> bool;
    fn hide_app(&self, pid: i32) -> bool;
}

/// Visible frame of the screen the window is currently on.
pub fn window_screen_frame<S: WindowSystem>(ws: &S, window_id: WindowId) -> Option<Rect> {
    ws.window_screen(window_id)
        .and_then(|screen_id| ws.screen_visible_frame(screen_id))
}
