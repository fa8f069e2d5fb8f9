mod init;
pub(crate) mod render;
mod step;
mod watchers;

use std::sync::mpsc::Receiver;

use nusa_render_raylib::{ModelCache, SolidModel};
use nusa_scene::Scene;
use raylib::prelude::{Model, Vector2};

pub use init::AppPaths;

pub struct App {
    pub scene: Scene,
    pub solids: Vec<Option<SolidModel>>,
    pub models: ModelCache<Model>,
    pub paths: AppPaths,
    pub debug_stats: DebugStats,
    pub(crate) pointer: PointerState,
    pub(crate) cursor_hidden: bool,
    pub(crate) content_event_rx: Option<Receiver<()>>,
}

#[derive(Default)]
pub struct DebugStats {
    pub draw_calls: usize,
    pub models_cached: usize,
    pub content_reloads: usize,
}

/// Left-button press tracking to tell clicks from orbit drags.
#[derive(Default)]
pub(crate) struct PointerState {
    pub(crate) pressed_at: Option<Vector2>,
    pub(crate) dragged: bool,
}
