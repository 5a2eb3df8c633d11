use serde::{Deserialize, Serialize};

use crate::{Command, Rect};

/// One line of a replay script: something the host would report to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Run a command directly, bypassing key bindings
    Command { command: Command },
    /// A hotkey press, resolved through the binding table
    Key {
        key: String,
        #[serde(default)]
        repeated: bool,
    },
    MouseMoved {
        x: i32,
        y: i32,
        /// Held modifier names (cmd, alt, ctrl, shift)
        #[serde(default)]
        modifiers: Vec<String>,
    },
    WindowOpened { window: WindowSpec },
    WindowClosed { id: u32 },
    WindowFocused { id: u32 },
    /// The user moved or resized a window outside the engine
    WindowMoved { id: u32, frame: Rect },
}

/// Description of a window as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub id: u32,
    #[serde(default)]
    pub pid: i32,
    pub app_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bundle_id: Option<String>,
    pub frame: Rect,
}
