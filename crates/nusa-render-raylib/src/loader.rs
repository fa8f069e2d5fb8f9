use std::path::Path;

use nusa_transition::{AssetError, ModelHandle, ModelLoader};
use raylib::prelude::*;

use crate::cache::ModelCache;

/// Frame-scoped [`ModelLoader`] over the raylib handle. Paths resolve
/// against the assets root.
pub struct RaylibModelLoader<'a> {
    pub rl: &'a mut RaylibHandle,
    pub thread: &'a RaylibThread,
    pub cache: &'a mut ModelCache<Model>,
    pub root: &'a Path,
}

impl ModelLoader for RaylibModelLoader<'_> {
    fn load(&mut self, path: &str) -> Result<ModelHandle, AssetError> {
        let rl = &mut *self.rl;
        let thread = self.thread;
        let root = self.root;
        self.cache.acquire(path, |p| {
            let full = root.join(p);
            if !full.is_file() {
                return Err(AssetError::NotFound(full.display().to_string()));
            }
            rl.load_model(thread, &full.to_string_lossy())
                .map_err(|e| AssetError::Load {
                    path: p.to_string(),
                    reason: e.to_string(),
                })
        })
    }

    fn release(&mut self, handle: ModelHandle) {
        // Dropping the evicted model unloads it from the GPU.
        drop(self.cache.release(handle));
    }
}
