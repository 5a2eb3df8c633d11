use serde::{Deserialize, Serialize};

use crate::Rect;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // Placement
    Place { direction: Direction },
    PlaceCorner { corner: Corner },
    ToggleMaximize,
    Maximize,
    ToggleFullscreen,
    SendToNextScreen,

    // Window operations
    MinimizeFocused,
    HideApp {
        #[serde(default)]
        all: bool,
    },
    ToggleMouseAction,
    /// Focus the next window of the focused app
    CycleWindows {
        #[serde(default)]
        reverse: bool,
    },

    // Keybinding operations
    Bind { key: String, action: Box<Command> },
    Unbind { key: String },
    ListBindings,

    // Queries
    WindowInfo,
    ListWindows,
    /// Visible windows on the focused window's screen
    ListScreenWindows,
    /// Screen under the last known pointer position
    PointerScreen,
}

impl Command {
    /// Short kebab-case label used when listing bindings.
    pub fn label(&self) -> String {
        match self {
            Command::Place { direction } => format!("place {}", direction.as_str()),
            Command::PlaceCorner { corner } => format!("place-corner {}", corner.as_str()),
            Command::ToggleMaximize => "toggle-maximize".to_string(),
            Command::Maximize => "maximize".to_string(),
            Command::ToggleFullscreen => "toggle-fullscreen".to_string(),
            Command::SendToNextScreen => "send-to-next-screen".to_string(),
            Command::MinimizeFocused => "minimize-focused".to_string(),
            Command::HideApp { all: false } => "hide-app".to_string(),
            Command::HideApp { all: true } => "hide-app --all".to_string(),
            Command::ToggleMouseAction => "toggle-mouse-action".to_string(),
            Command::CycleWindows { reverse: false } => "cycle-windows".to_string(),
            Command::CycleWindows { reverse: true } => "cycle-windows --reverse".to_string(),
            Command::Bind { key, action } => format!("bind {} {}", key, action.label()),
            Command::Unbind { key } => format!("unbind {}", key),
            Command::ListBindings => "list-bindings".to_string(),
            Command::WindowInfo => "window-info".to_string(),
            Command::ListWindows => "list-windows".to_string(),
            Command::ListScreenWindows => "list-screen-windows".to_string(),
            Command::PointerScreen => "pointer-screen".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Error { message: String },
    /// Result of a frame-changing command; `changed` is false when nothing was applied.
    Applied { changed: bool },
    Window { window: WindowInfo },
    Windows { windows: Vec<WindowInfo> },
    Bindings { bindings: Vec<BindingInfo> },
    Screen { screen: ScreenInfo },
}

impl Response {
    pub fn applied(changed: bool) -> Self {
        Response::Applied { changed }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingInfo {
    pub key: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenInfo {
    pub id: u32,
    pub visible_frame: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub id: u32,
    pub pid: i32,
    pub title: String,
    pub app_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_id: Option<u32>,
    pub frame: Rect,
    pub is_focused: bool,
    pub is_maximized: bool,
}
