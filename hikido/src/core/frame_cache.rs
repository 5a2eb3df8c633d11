use std::collections::HashMap;

use hikido_ipc::Rect;

use crate::platform::WindowId;

/// A window frame together with the visible frame of the screen it was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSnapshot {
    pub screen: Rect,
    pub window: Rect,
}

/// Frames remembered for one window across a maximize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedFrames {
    /// Screen the window was on before maximizing
    pub screen: Rect,
    /// Window frame before maximizing
    pub window: Rect,
    /// What the window looked like right after maximizing
    pub maximized: Option<FrameSnapshot>,
}

impl CachedFrames {
    pub fn previous(&self) -> FrameSnapshot {
        FrameSnapshot {
            screen: self.screen,
            window: self.window,
        }
    }
}

/// Pre-maximize frames keyed by window identity.
#[derive(Debug, Default)]
pub struct FrameCache {
    entries: HashMap<WindowId, CachedFrames>,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, window_id: WindowId, frames: CachedFrames) -> Option<CachedFrames> {
        self.entries.insert(window_id, frames)
    }

    pub fn get(&self, window_id: WindowId) -> Option<&CachedFrames> {
        self.entries.get(&window_id)
    }

    pub fn remove(&mut self, window_id: WindowId) -> Option<CachedFrames> {
        let removed = self.entries.remove(&window_id);
        if removed.is_some() {
            tracing::debug!("Dropped cached frames for window {}", window_id);
        }
        removed
    }

    #[cfg(test)]
    pub fn contains(&self, window_id: WindowId) -> bool {
        self.entries.contains_key(&window_id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
