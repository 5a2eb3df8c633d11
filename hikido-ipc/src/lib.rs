pub mod command;
pub mod event;
pub mod geometry;

pub use command::{BindingInfo, Command, Corner, Direction, Response, ScreenInfo, WindowInfo};
pub use event::{Event, WindowSpec};
pub use geometry::{Point, Rect};
