//! Camera rig for the map overview: a perspective pose, an orbit controller
//! with damping and limits, and eased camera tweens.
#![forbid(unsafe_code)]

mod orbit;
mod pose;
mod tween;

pub use orbit::{OrbitConfig, OrbitController};
pub use pose::CameraPose;
pub use tween::{CameraTween, DEFAULT_TWEEN_SECS};
