use hikido_ipc::{Command, Event, Point, Response};

use super::App;
use crate::hotkey::Modifiers;
use crate::platform::{WindowManipulator, WindowSystem};

impl App {
    /// Routes one host event: window lifecycle bookkeeping, hotkeys and
    /// mouse movement. The host is expected to already reflect the event.
    pub async fn handle_event<S: WindowSystem, M: WindowManipulator>(
        &mut self,
        ws: &S,
        wm: &M,
        event: &Event,
    ) -> Response {
        match event {
            Event::Command { command } => self.process_command(ws, wm, command).await,
            Event::Key { key, repeated } => self.handle_key(ws, wm, key, *repeated).await,
            Event::MouseMoved { x, y, modifiers } => {
                let point = Point::new(*x, *y);
                self.pointer = Some(point);
                let modifiers = Modifiers::from_names(modifiers.as_slice()).unwrap_or_else(|e| {
                    tracing::debug!("Ignoring mouse modifiers: {}", e);
                    Modifiers::NONE
                });
                let changed = self.mouse.handle_mouse_moved(
                    &mut self.cache,
                    ws,
                    wm,
                    point,
                    modifiers,
                );
                Response::applied(changed)
            }
            Event::WindowOpened { window } => {
                tracing::debug!("Window opened: {} ({})", window.id, window.app_name);
                Response::Ok
            }
            Event::WindowClosed { id } => {
                // Ids are reused by the host, a new window must not inherit this entry
                self.cache.remove(*id);
                Response::Ok
            }
            Event::WindowFocused { id } => {
                tracing::debug!("Window focused: {}", id);
                Response::Ok
            }
            Event::WindowMoved { id, frame } => {
                tracing::debug!("Window {} moved to {}", id, frame);
                Response::Ok
            }
        }
    }

    async fn handle_key<S: WindowSystem, M: WindowManipulator>(
        &mut self,
        ws: &S,
        wm: &M,
        key: &str,
        repeated: bool,
    ) -> Response {
        let command = match self.bindings.lookup(key) {
            Ok(Some(command)) => command.clone(),
            Ok(None) => return Response::error(format!("Key is not bound: {}", key)),
            Err(e) => return Response::error(e),
        };

        let command = match (command, repeated) {
            // Holding the hide key hides everything
            (Command::HideApp { .. }, true) => Command::HideApp { all: true },
            (Command::ToggleMouseAction, true) => {
                tracing::debug!("Ignoring repeated {}", key);
                return Response::Ok;
            }
            (command, _) => command,
        };
        self.process_command(ws, wm, &command).await
    }
}
