//! Scene orchestration: owns every engine, routes queued input events to
//! them and runs the per-frame update in a fixed order.
#![forbid(unsafe_code)]

pub mod event;
pub mod hud;
pub mod music;
pub mod scene;

pub use event::{Event, EventEnvelope, EventQueue};
pub use hud::{Banner, HudStats};
pub use music::{MusicDeck, Soundtrack};
pub use scene::{BACKGROUNDS, Mode, Scene, SceneConfig, SceneError, WorldSwap};
