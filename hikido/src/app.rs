mod command;
mod dispatch;
mod replay;
mod screen;

pub use replay::run_replay;

use anyhow::Result;
use hikido_ipc::Point;

use crate::core::{Config, FrameCache, MouseAction};
use crate::hotkey::Bindings;

/// Engine state that outlives a single event: cached frames, the mouse
/// drag and the hotkey table.
pub struct App {
    cache: FrameCache,
    mouse: MouseAction,
    /// Last pointer position reported by the host
    pointer: Option<Point>,
    bindings: Bindings,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let bindings = config.build_bindings()?;
        let mouse = MouseAction::new(config.hyper_modifiers()?, config.sticky_threshold);
        tracing::debug!("App created with {} bindings", bindings.len());
        Ok(Self {
            cache: FrameCache::new(),
            mouse,
            pointer: None,
            bindings,
            config,
        })
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    #[cfg(test)]
    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    #[cfg(test)]
    pub fn mouse_action_enabled(&self) -> bool {
        self.mouse.is_enabled()
    }
}
