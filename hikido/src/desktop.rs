use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use hikido_ipc::{Event, Point, Rect, WindowSpec};
use serde::Deserialize;

use crate::platform::{ScreenId, WindowId, WindowManipulator, WindowSystem};

/// Desktop fixture file: screens in host order, windows most recent first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DesktopFixture {
    pub screens: Vec<ScreenSpec>,
    #[serde(default)]
    pub windows: Vec<WindowSpec>,
    #[serde(default)]
    pub focused: Option<WindowId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenSpec {
    pub id: ScreenId,
    pub frame: Rect,
    /// Defaults to the full frame
    #[serde(default)]
    pub visible_frame: Option<Rect>,
}

#[derive(Debug, Clone)]
struct Screen {
    id: ScreenId,
    frame: Rect,
    visible_frame: Rect,
}

#[derive(Debug, Clone)]
struct DesktopWindow {
    spec: WindowSpec,
    minimized: bool,
    fullscreen: bool,
    frame_before_fullscreen: Option<Rect>,
}

#[derive(Debug, Default)]
struct DesktopState {
    screens: Vec<Screen>,
    /// Most recently focused first
    windows: Vec<DesktopWindow>,
    focused: Option<WindowId>,
    hidden_pids: HashSet<i32>,
    frame_changes: usize,
}

impl DesktopState {
    fn window(&self, window_id: WindowId) -> Option<&DesktopWindow> {
        self.windows.iter().find(|w| w.spec.id == window_id)
    }

    fn window_mut(&mut self, window_id: WindowId) -> Option<&mut DesktopWindow> {
        self.windows.iter_mut().find(|w| w.spec.id == window_id)
    }

    fn is_visible(&self, window: &DesktopWindow) -> bool {
        !window.minimized && !self.hidden_pids.contains(&window.spec.pid)
    }

    /// Screen containing the window's center, falling back to the first screen.
    fn screen_for(&self, frame: &Rect) -> Option<&Screen> {
        let center = frame.center();
        self.screens
            .iter()
            .find(|s| s.frame.contains(center))
            .or_else(|| self.screens.first())
    }

    fn raise(&mut self, window_id: WindowId) {
        if let Some(pos) = self.windows.iter().position(|w| w.spec.id == window_id) {
            let window = self.windows.remove(pos);
            self.windows.insert(0, window);
        }
    }
}

/// In-memory host: owns screens and windows and applies manipulations immediately.
#[derive(Debug, Default)]
pub struct Desktop {
    state: RefCell<DesktopState>,
}

impl Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: DesktopFixture) -> Self {
        let mut desktop = Self::new();
        for screen in fixture.screens {
            desktop = desktop.with_screen(screen.id, screen.frame, screen.visible_frame);
        }
        for window in fixture.windows {
            desktop = desktop.with_window(window);
        }
        desktop.with_focused(fixture.focused)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read desktop fixture {}", path.display()))?;
        let fixture: DesktopFixture = serde_json::from_str(&content)
            .with_context(|| format!("Invalid desktop fixture {}", path.display()))?;
        if fixture.screens.is_empty() {
            anyhow::bail!("Desktop fixture {} has no screens", path.display());
        }
        Ok(Self::from_fixture(fixture))
    }

    pub fn with_screen(self, id: ScreenId, frame: Rect, visible_frame: Option<Rect>) -> Self {
        self.state.borrow_mut().screens.push(Screen {
            id,
            frame,
            visible_frame: visible_frame.unwrap_or(frame),
        });
        self
    }

    /// Appends a window behind the existing ones in focus order.
    pub fn with_window(self, spec: WindowSpec) -> Self {
        self.state.borrow_mut().windows.push(DesktopWindow::new(spec));
        self
    }

    pub fn with_focused(self, window_id: Option<WindowId>) -> Self {
        self.state.borrow_mut().focused = window_id;
        self
    }

    /// Adds a new window in front and focuses it.
    pub fn open_window(&self, spec: WindowSpec) {
        let mut state = self.state.borrow_mut();
        let id = spec.id;
        state.windows.retain(|w| w.spec.id != id);
        state.windows.insert(0, DesktopWindow::new(spec));
        state.focused = Some(id);
    }

    pub fn close_window(&self, window_id: WindowId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.windows.len();
        state.windows.retain(|w| w.spec.id != window_id);
        if state.focused == Some(window_id) {
            state.focused = None;
        }
        state.windows.len() != before
    }

    /// A move made by the user, not by the engine.
    pub fn move_window(&self, window_id: WindowId, frame: Rect) -> bool {
        let mut state = self.state.borrow_mut();
        match state.window_mut(window_id) {
            Some(window) => {
                window.spec.frame = frame;
                true
            }
            None => false,
        }
    }

    /// Mirrors a script event into the desktop before the engine sees it.
    pub fn apply_event(&self, event: &Event) {
        match event {
            Event::WindowOpened { window } => self.open_window(window.clone()),
            Event::WindowClosed { id } => {
                if !self.close_window(*id) {
                    tracing::debug!("Closed window {} was not on the desktop", id);
                }
            }
            Event::WindowFocused { id } => {
                self.focus_window(*id);
            }
            Event::WindowMoved { id, frame } => {
                if !self.move_window(*id, *frame) {
                    tracing::debug!("Moved window {} was not on the desktop", id);
                }
            }
            Event::Command { .. } | Event::Key { .. } | Event::MouseMoved { .. } => {}
        }
    }

    /// Number of frames applied through `set_window_frame`.
    #[cfg(test)]
    pub fn frame_changes(&self) -> usize {
        self.state.borrow().frame_changes
    }

    #[cfg(test)]
    pub fn is_minimized(&self, window_id: WindowId) -> bool {
        self.state
            .borrow()
            .window(window_id)
            .is_some_and(|w| w.minimized)
    }

    #[cfg(test)]
    pub fn is_app_hidden(&self, pid: i32) -> bool {
        self.state.borrow().hidden_pids.contains(&pid)
    }
}

impl DesktopWindow {
    fn new(spec: WindowSpec) -> Self {
        Self {
            spec,
            minimized: false,
            fullscreen: false,
            frame_before_fullscreen: None,
        }
    }
}

impl WindowSystem for Desktop {
    fn focused_window(&self) -> Option<WindowId> {
        self.state.borrow().focused
    }

    fn window_frame(&self, window_id: WindowId) -> Option<Rect> {
        self.state.borrow().window(window_id).map(|w| w.spec.frame)
    }

    fn window_spec(&self, window_id: WindowId) -> Option<WindowSpec> {
        self.state.borrow().window(window_id).map(|w| w.spec.clone())
    }

    fn window_screen(&self, window_id: WindowId) -> Option<ScreenId> {
        let state = self.state.borrow();
        let window = state.window(window_id)?;
        state.screen_for(&window.spec.frame).map(|s| s.id)
    }

    fn screen_visible_frame(&self, screen_id: ScreenId) -> Option<Rect> {
        self.state
            .borrow()
            .screens
            .iter()
            .find(|s| s.id == screen_id)
            .map(|s| s.visible_frame)
    }

    fn next_screen(&self, screen_id: ScreenId) -> Option<ScreenId> {
        let state = self.state.borrow();
        let pos = state.screens.iter().position(|s| s.id == screen_id)?;
        let next = (pos + 1) % state.screens.len();
        Some(state.screens[next].id)
    }

    fn window_at(&self, point: Point) -> Option<WindowId> {
        let state = self.state.borrow();
        state
            .windows
            .iter()
            .find(|w| state.is_visible(w) && w.spec.frame.contains(point))
            .map(|w| w.spec.id)
    }

    fn screen_at(&self, point: Point) -> Option<ScreenId> {
        self.state
            .borrow()
            .screens
            .iter()
            .find(|s| s.frame.contains(point))
            .map(|s| s.id)
    }

    fn is_fullscreen(&self, window_id: WindowId) -> bool {
        self.state
            .borrow()
            .window(window_id)
            .is_some_and(|w| w.fullscreen)
    }

    fn recent_windows(&self) -> Vec<WindowId> {
        let state = self.state.borrow();
        state
            .windows
            .iter()
            .filter(|w| state.is_visible(w))
            .map(|w| w.spec.id)
            .collect()
    }

    fn visible_windows_on_screen(&self, screen_id: ScreenId) -> Vec<WindowId> {
        let state = self.state.borrow();
        state
            .windows
            .iter()
            .filter(|w| state.is_visible(w))
            .filter(|w| state.screen_for(&w.spec.frame).map(|s| s.id) == Some(screen_id))
            .map(|w| w.spec.id)
            .collect()
    }

    fn all_windows(&self) -> Vec<WindowId> {
        self.state.borrow().windows.iter().map(|w| w.spec.id).collect()
    }
}

impl WindowManipulator for Desktop {
    fn set_window_frame(&self, window_id: WindowId, frame: Rect) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(window) = state.window_mut(window_id) else {
            tracing::warn!("Could not find window {} to set frame", window_id);
            return false;
        };
        window.spec.frame = frame;
        state.frame_changes += 1;
        tracing::debug!(
            "Set window {} frame to {} (change {})",
            window_id,
            frame,
            state.frame_changes
        );
        true
    }

    fn set_window_top_left(&self, window_id: WindowId, point: Point) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(window) = state.window_mut(window_id) else {
            tracing::warn!("Could not find window {} to move", window_id);
            return false;
        };
        window.spec.frame = window.spec.frame.with_origin(point);
        tracing::debug!("Moved window {} to ({}, {})", window_id, point.x, point.y);
        true
    }

    fn maximize_window(&self, window_id: WindowId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(frame) = state.window(window_id).map(|w| w.spec.frame) else {
            return false;
        };
        let Some(visible) = state.screen_for(&frame).map(|s| s.visible_frame) else {
            return false;
        };
        if let Some(window) = state.window_mut(window_id) {
            window.spec.frame = visible;
        }
        tracing::debug!("Maximized window {} to {}", window_id, visible);
        true
    }

    fn set_fullscreen(&self, window_id: WindowId, fullscreen: bool) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(frame) = state.window(window_id).map(|w| w.spec.frame) else {
            return false;
        };
        let Some(screen_frame) = state.screen_for(&frame).map(|s| s.frame) else {
            return false;
        };
        let Some(window) = state.window_mut(window_id) else {
            return false;
        };
        if window.fullscreen == fullscreen {
            return true;
        }
        if fullscreen {
            window.frame_before_fullscreen = Some(window.spec.frame);
            window.spec.frame = screen_frame;
        } else if let Some(previous) = window.frame_before_fullscreen.take() {
            window.spec.frame = previous;
        }
        window.fullscreen = fullscreen;
        tracing::debug!("Window {} fullscreen: {}", window_id, fullscreen);
        true
    }

    fn focus_window(&self, window_id: WindowId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(window) = state.window_mut(window_id) else {
            return false;
        };
        window.minimized = false;
        let pid = window.spec.pid;
        state.hidden_pids.remove(&pid);
        state.raise(window_id);
        state.focused = Some(window_id);
        true
    }

    fn minimize_window(&self, window_id: WindowId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(window) = state.window_mut(window_id) else {
            return false;
        };
        window.minimized = true;
        if state.focused == Some(window_id) {
            state.focused = None;
        }
        true
    }

    fn hide_app(&self, pid: i32) -> bool {
        let mut state = self.state.borrow_mut();
        state.hidden_pids.insert(pid);
        let focused_hidden = state
            .focused
            .and_then(|id| state.window(id))
            .is_some_and(|w| w.spec.pid == pid);
        if focused_hidden {
            state.focused = None;
        }
        tracing::info!("Hid app (pid {})", pid);
        true
    }
}
