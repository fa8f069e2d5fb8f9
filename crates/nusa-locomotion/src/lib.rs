//! First-person locomotion on a circular platform: acceleration and
//! friction, gravity and jumping, double-tap flight, head bob, boundary
//! containment and circle collision against placed objects.
#![forbid(unsafe_code)]

mod capture;
mod collision;
mod config;
mod controller;
mod input;

pub use capture::PointerCapture;
pub use collision::{Obstacle, collides};
pub use config::LocomotionConfig;
pub use controller::{FirstPersonController, LocomotionState, Toast};
pub use input::MoveInput;
