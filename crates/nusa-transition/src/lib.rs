//! Portal transition between the map overview and a province world, and the
//! province world itself.
#![forbid(unsafe_code)]

pub mod engine;
pub mod loader;
pub mod portal;
pub mod stage;
pub mod world;

pub use engine::{TransitionEngine, TransitionEvent};
pub use loader::{AssetError, ModelHandle, ModelLoader};
pub use portal::{Flash, Portal};
pub use stage::{Direction, Stage, StageTimings};
pub use world::{
    Particle, ProvinceWorld, Transform, Visual, WorldChild, WorldChildKind, WorldLayout,
};
