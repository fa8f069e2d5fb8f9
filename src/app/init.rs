use std::path::PathBuf;

use nusa_content::ContentTables;
use nusa_render_raylib::{ModelCache, upload_solid};
use nusa_scene::{Scene, SceneConfig, SceneError};
use raylib::prelude::*;

use super::{App, DebugStats, PointerState};

/// Where the app reads its inputs from.
#[derive(Clone, Debug)]
pub struct AppPaths {
    pub geojson: PathBuf,
    pub content: PathBuf,
    pub media: PathBuf,
    pub watch_content: bool,
}

/// Content tables, or the built-in placeholder set when the file is missing
/// or broken.
pub(crate) fn load_content(path: &std::path::Path) -> ContentTables {
    match ContentTables::from_path(path) {
        Ok(tables) => tables,
        Err(e) => {
            log::warn!("content {:?} unusable ({}); using placeholders", path, e);
            ContentTables::default()
        }
    }
}

impl App {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        paths: AppPaths,
        config: SceneConfig,
    ) -> Result<Self, SceneError> {
        let content = load_content(&paths.content);
        let scene = Scene::load(&paths.geojson, content, config)?;

        let solids: Vec<_> = scene
            .registry()
            .all()
            .iter()
            .map(|r| upload_solid(rl, thread, &r.solid))
            .collect();
        let uploaded = solids.iter().filter(|s| s.is_some()).count();
        log::info!(
            "uploaded {}/{} region solids",
            uploaded,
            scene.registry().len()
        );

        let content_event_rx = if paths.watch_content {
            Some(Self::spawn_content_watcher(paths.content.clone()))
        } else {
            None
        };

        Ok(Self {
            scene,
            solids,
            models: ModelCache::new(),
            paths,
            debug_stats: DebugStats::default(),
            pointer: PointerState::default(),
            cursor_hidden: false,
            content_event_rx,
        })
    }

    fn spawn_content_watcher(path: PathBuf) -> std::sync::mpsc::Receiver<()> {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        std::thread::spawn(move || {
            use notify::{EventKind, RecursiveMode, Watcher};
            match notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    match event.kind {
                        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                            let _ = tx.send(());
                        }
                        _ => {}
                    }
                }
            }) {
                Ok(mut watcher) => {
                    if let Err(e) = watcher.watch(path.as_path(), RecursiveMode::NonRecursive) {
                        log::warn!("cannot watch {:?}: {}", path, e);
                        return;
                    }
                    log::info!("watching {:?} for changes", path);
                    loop {
                        std::thread::sleep(std::time::Duration::from_secs(3600));
                    }
                }
                Err(e) => log::warn!("file watcher unavailable: {}", e),
            }
        });
        rx
    }
}
