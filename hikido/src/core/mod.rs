mod candidates;
mod config;
mod frame;
mod frame_cache;
mod mouse_action;
mod placement;

pub use candidates::*;
pub use config::*;
pub use frame::*;
pub use frame_cache::*;
pub use mouse_action::*;
pub use placement::*;
