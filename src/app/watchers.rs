use super::App;

impl App {
    /// Reloads the content tables after the file changed on disk. A broken
    /// file keeps the tables already in use.
    pub fn process_content_file_events(&mut self) {
        let Some(rx) = self.content_event_rx.as_ref() else {
            return;
        };
        if rx.try_iter().count() == 0 {
            return;
        }
        if !self.paths.content.is_file() {
            log::warn!("content file {:?} vanished; keeping current tables", self.paths.content);
            return;
        }
        match nusa_content::ContentTables::from_path(&self.paths.content) {
            Ok(tables) => {
                self.scene.set_content(tables);
                self.debug_stats.content_reloads += 1;
                log::info!("content tables reloaded");
            }
            Err(e) => {
                log::warn!("content reload failed: {}; keeping current tables", e);
            }
        }
    }
}
