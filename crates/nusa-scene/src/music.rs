use nusa_transition::AssetError;

/// Audio output for one looping background track at a time.
pub trait Soundtrack {
    /// Starts `path` from the beginning, replacing whatever was playing.
    fn start(&mut self, path: &str) -> Result<(), AssetError>;
    fn set_volume(&mut self, volume: f32);
    fn stop(&mut self);
    /// Called once per frame to keep streams fed.
    fn pump(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fade {
    Silent,
    In,
    Playing,
    Out,
}

/// Fades province music in and out on top of a [`Soundtrack`].
#[derive(Debug)]
pub struct MusicDeck {
    pub target_volume: f32,
    /// Seconds.
    pub fade_in: f32,
    pub fade_out: f32,
    fade: Fade,
    volume: f32,
    muted: bool,
    current: Option<String>,
}

impl Default for MusicDeck {
    fn default() -> Self {
        Self {
            target_volume: 0.5,
            fade_in: 1.0,
            fade_out: 0.5,
            fade: Fade::Silent,
            volume: 0.0,
            muted: false,
            current: None,
        }
    }
}

impl MusicDeck {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Self::default()
        }
    }

    #[inline]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    #[inline]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self.fade, Fade::In | Fade::Playing)
    }

    /// Plays `path`, or `fallback` when it cannot be started. Restarting the
    /// track already playing is a no-op.
    pub fn play(&mut self, path: &str, fallback: &str, out: &mut dyn Soundtrack) {
        if self.is_playing() && self.current.as_deref() == Some(path) {
            return;
        }
        let started = match out.start(path) {
            Ok(()) => Some(path),
            Err(err) if path != fallback => {
                log::warn!("music: {}; trying {}", err, fallback);
                match out.start(fallback) {
                    Ok(()) => Some(fallback),
                    Err(err) => {
                        log::warn!("music: {}", err);
                        None
                    }
                }
            }
            Err(err) => {
                log::warn!("music: {}", err);
                None
            }
        };
        match started {
            Some(track) => {
                log::info!("music: playing {}", track);
                self.current = Some(track.to_string());
                self.volume = 0.0;
                self.fade = Fade::In;
                out.set_volume(0.0);
            }
            None => {
                self.current = None;
                self.fade = Fade::Silent;
            }
        }
    }

    /// Fades out, then stops the output.
    pub fn stop(&mut self) {
        if self.is_playing() {
            self.fade = Fade::Out;
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("music {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn update(&mut self, dt: f32, out: &mut dyn Soundtrack) {
        let dt = dt.max(0.0);
        match self.fade {
            Fade::Silent => return,
            Fade::In => {
                self.volume += self.target_volume * dt / self.fade_in.max(1e-3);
                if self.volume >= self.target_volume {
                    self.volume = self.target_volume;
                    self.fade = Fade::Playing;
                }
            }
            Fade::Playing => {}
            Fade::Out => {
                self.volume -= self.target_volume * dt / self.fade_out.max(1e-3);
                if self.volume <= 0.0 {
                    self.volume = 0.0;
                    self.fade = Fade::Silent;
                    self.current = None;
                    out.set_volume(0.0);
                    out.stop();
                    return;
                }
            }
        }
        out.set_volume(if self.muted { 0.0 } else { self.volume });
        out.pump();
    }
}
