use std::path::PathBuf;

use nusa_scene::Soundtrack;
use nusa_transition::AssetError;
use raylib::prelude::*;

/// One looping music stream on the raylib audio device.
pub struct RaylibSoundtrack<'aud> {
    audio: Option<&'aud RaylibAudio>,
    root: PathBuf,
    music: Option<Music<'aud>>,
}

impl<'aud> RaylibSoundtrack<'aud> {
    pub fn new(audio: Option<&'aud RaylibAudio>, root: PathBuf) -> Self {
        Self {
            audio,
            root,
            music: None,
        }
    }
}

impl Soundtrack for RaylibSoundtrack<'_> {
    fn start(&mut self, path: &str) -> Result<(), AssetError> {
        self.stop();
        let Some(audio) = self.audio else {
            return Err(AssetError::Load {
                path: path.to_string(),
                reason: "no audio device".into(),
            });
        };
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(AssetError::NotFound(full.display().to_string()));
        }
        let mut music = audio
            .new_music(&full.to_string_lossy())
            .map_err(|e| AssetError::Load {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        music.play_stream();
        self.music = Some(music);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        if let Some(music) = self.music.as_mut() {
            music.set_volume(volume);
        }
    }

    fn stop(&mut self) {
        if let Some(mut music) = self.music.take() {
            music.stop_stream();
        }
    }

    fn pump(&mut self) {
        if let Some(music) = self.music.as_mut() {
            music.update_stream();
        }
    }
}
