pub mod evidence;
pub mod formatter;
pub mod protocol;

pub use evidence::Evidence;
pub use protocol::{
    Action, ActionKind, Bounds, DeviceProfile, Key, Stage, SwipeDirection, Target, UiElement,
};
