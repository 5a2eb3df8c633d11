use std::time::Duration;

use hikido_ipc::{BindingInfo, Command, Rect, Response, ScreenInfo, WindowInfo};

use super::screen::send_to_next_screen;
use super::App;
use crate::core::{
    corner_frames, direction_frames, is_maximized, maximize, set_focused_frame, toggle_maximized,
};
use crate::platform::{window_screen_frame, WindowId, WindowManipulator, WindowSystem};

/// Number of recently focused windows checked for a placement partner.
const PARTNER_WINDOWS: usize = 2;

impl App {
    pub async fn process_command<S: WindowSystem, M: WindowManipulator>(
        &mut self,
        ws: &S,
        wm: &M,
        cmd: &Command,
    ) -> Response {
        tracing::debug!("Processing command: {}", cmd.label());
        match cmd {
            Command::Bind { key, action } => match self.bindings.bind(key, (**action).clone()) {
                Ok(()) => Response::Ok,
                Err(e) => Response::error(e),
            },
            Command::Unbind { key } => match self.bindings.unbind(key) {
                Ok(()) => Response::Ok,
                Err(e) => Response::error(e),
            },
            Command::ListBindings => Response::Bindings {
                bindings: self
                    .bindings
                    .list()
                    .into_iter()
                    .map(|(key, action)| BindingInfo {
                        key,
                        action: action.label(),
                    })
                    .collect(),
            },
            Command::ToggleMouseAction => {
                self.mouse.toggle();
                Response::Ok
            }
            Command::ListWindows => Response::Windows {
                windows: ws
                    .all_windows()
                    .into_iter()
                    .filter_map(|id| self.window_info(ws, id))
                    .collect(),
            },
            Command::HideApp { all: true } => Response::applied(hide_visible_apps(ws, wm)),
            Command::PointerScreen => self.pointer_screen(ws),
            Command::Place { .. }
            | Command::PlaceCorner { .. }
            | Command::ToggleMaximize
            | Command::Maximize
            | Command::ToggleFullscreen
            | Command::SendToNextScreen
            | Command::MinimizeFocused
            | Command::HideApp { all: false }
            | Command::CycleWindows { .. }
            | Command::WindowInfo
            | Command::ListScreenWindows => {
                let Some(window_id) = ws.focused_window() else {
                    tracing::debug!("No focused window for {}", cmd.label());
                    return Response::applied(false);
                };
                self.process_window_command(ws, wm, window_id, cmd).await
            }
        }
    }

    /// Commands acting on the focused window.
    async fn process_window_command<S: WindowSystem, M: WindowManipulator>(
        &mut self,
        ws: &S,
        wm: &M,
        window_id: WindowId,
        cmd: &Command,
    ) -> Response {
        let cache = &mut self.cache;
        let changed = match cmd {
            Command::Place { direction } => {
                let Some(screen) = window_screen_frame(ws, window_id) else {
                    return Response::applied(false);
                };
                let recent: Vec<Rect> = ws
                    .recent_windows()
                    .into_iter()
                    .take(PARTNER_WINDOWS)
                    .filter_map(|id| ws.window_frame(id))
                    .collect();
                let frames = direction_frames(
                    screen,
                    *direction,
                    &recent,
                    self.config.wide_screen_threshold,
                );
                set_focused_frame(cache, ws, wm, &candidates(frames))
            }
            Command::PlaceCorner { corner } => {
                let Some(screen) = window_screen_frame(ws, window_id) else {
                    return Response::applied(false);
                };
                let frames = corner_frames(screen, *corner);
                set_focused_frame(cache, ws, wm, &candidates(frames))
            }
            Command::ToggleMaximize => toggle_maximized(cache, ws, wm, window_id),
            Command::Maximize => maximize(cache, ws, wm, window_id),
            Command::ToggleFullscreen => {
                let fullscreen = !ws.is_fullscreen(window_id);
                tracing::info!("Window {} fullscreen: {}", window_id, fullscreen);
                wm.set_fullscreen(window_id, fullscreen)
            }
            Command::SendToNextScreen => {
                let settle = Duration::from_millis(self.config.fullscreen_settle_ms);
                send_to_next_screen(cache, ws, wm, window_id, settle).await
            }
            Command::MinimizeFocused => minimize_focused(ws, wm, window_id),
            Command::CycleWindows { reverse } => cycle_app_windows(ws, wm, window_id, *reverse),
            Command::HideApp { .. } => match ws.window_spec(window_id) {
                Some(spec) => {
                    tracing::info!("Hiding {}", spec.app_name);
                    wm.hide_app(spec.pid)
                }
                None => false,
            },
            Command::WindowInfo => {
                return match self.window_info(ws, window_id) {
                    Some(window) => {
                        tracing::info!(
                            "Window information: {} \"{}\" {} pid {}",
                            window.app_name,
                            window.title,
                            window.frame,
                            window.pid
                        );
                        Response::Window { window }
                    }
                    None => Response::error(format!("Window {} not found", window_id)),
                };
            }
            Command::ListScreenWindows => {
                let windows = ws
                    .window_screen(window_id)
                    .map(|screen| ws.visible_windows_on_screen(screen))
                    .unwrap_or_default();
                return Response::Windows {
                    windows: windows
                        .into_iter()
                        .filter_map(|id| self.window_info(ws, id))
                        .collect(),
                };
            }
            Command::Bind { .. }
            | Command::Unbind { .. }
            | Command::ListBindings
            | Command::ToggleMouseAction
            | Command::ListWindows
            | Command::PointerScreen => {
                tracing::warn!("Not a window command: {}", cmd.label());
                return Response::error(format!("Not a window command: {}", cmd.label()));
            }
        };
        Response::applied(changed)
    }

    /// Screen under the last known pointer position.
    fn pointer_screen<S: WindowSystem>(&self, ws: &S) -> Response {
        let Some(point) = self.pointer else {
            return Response::error("Pointer position is unknown");
        };
        let screen = ws.screen_at(point).and_then(|id| {
            ws.screen_visible_frame(id)
                .map(|visible_frame| ScreenInfo { id, visible_frame })
        });
        match screen {
            Some(screen) => {
                tracing::info!("Pointer is on screen {} {}", screen.id, screen.visible_frame);
                Response::Screen { screen }
            }
            None => Response::error(format!("No screen at ({}, {})", point.x, point.y)),
        }
    }

    fn window_info<S: WindowSystem>(&self, ws: &S, window_id: WindowId) -> Option<WindowInfo> {
        let spec = ws.window_spec(window_id)?;
        Some(WindowInfo {
            id: spec.id,
            pid: spec.pid,
            title: spec.title,
            app_name: spec.app_name,
            bundle_id: spec.bundle_id,
            screen_id: ws.window_screen(window_id),
            frame: spec.frame,
            is_focused: ws.focused_window() == Some(window_id),
            is_maximized: is_maximized(&self.cache, ws, window_id),
        })
    }
}

fn candidates(frames: Vec<Rect>) -> Vec<Option<Rect>> {
    frames.into_iter().map(Some).collect()
}

/// Minimizes the window and hands focus to the next visible window on its screen.
fn minimize_focused<S: WindowSystem, M: WindowManipulator>(
    ws: &S,
    wm: &M,
    window_id: WindowId,
) -> bool {
    let visible = ws
        .window_screen(window_id)
        .map(|screen| ws.visible_windows_on_screen(screen))
        .unwrap_or_default();

    let ok = wm.minimize_window(window_id);
    if let Some(&next) = visible.get(1) {
        tracing::debug!("Focusing window {} after minimize", next);
        wm.focus_window(next);
    }
    ok
}

/// Focuses the next visible window of the same app, in window id order,
/// wrapping around.
fn cycle_app_windows<S: WindowSystem, M: WindowManipulator>(
    ws: &S,
    wm: &M,
    window_id: WindowId,
    reverse: bool,
) -> bool {
    let Some(pid) = ws.window_spec(window_id).map(|spec| spec.pid) else {
        return false;
    };
    let mut windows: Vec<WindowId> = ws
        .recent_windows()
        .into_iter()
        .filter(|&id| ws.window_spec(id).is_some_and(|spec| spec.pid == pid))
        .collect();
    windows.sort_unstable();

    let Some(pos) = windows.iter().position(|&id| id == window_id) else {
        return false;
    };
    let len = windows.len();
    if len < 2 {
        tracing::debug!("No other window of pid {} to cycle to", pid);
        return false;
    }
    let next = if reverse { (pos + len - 1) % len } else { (pos + 1) % len };
    tracing::debug!("Cycling from window {} to {}", window_id, windows[next]);
    wm.focus_window(windows[next])
}

/// Hides every app that owns a visible window.
fn hide_visible_apps<S: WindowSystem, M: WindowManipulator>(ws: &S, wm: &M) -> bool {
    let mut pids: Vec<i32> = ws
        .recent_windows()
        .into_iter()
        .filter_map(|id| ws.window_spec(id).map(|spec| spec.pid))
        .collect();
    pids.sort_unstable();
    pids.dedup();

    let mut hidden = false;
    for pid in pids {
        hidden |= wm.hide_app(pid);
    }
    hidden
}
