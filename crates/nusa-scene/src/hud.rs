use crate::scene::Mode;

/// Timed message shown centre screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub title: String,
    pub subtitle: String,
    pub remaining: f32,
}

impl Banner {
    pub const SECS: f32 = 3.0;

    pub fn welcome(name: &str) -> Self {
        Self {
            title: format!("Welcome to {}", name),
            subtitle: "WASD to move, Shift to run, Space to jump, double Space to fly, Esc to leave"
                .to_string(),
            remaining: Self::SECS,
        }
    }

    /// Returns false once expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt.max(0.0);
        self.remaining > 0.0
    }
}

/// Numbers for the info panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudStats {
    pub province_count: usize,
    pub solid_count: usize,
    pub selected: Option<String>,
    pub camera_distance: f32,
    pub mode: Mode,
    pub transitioning: bool,
    /// "Click to look around" prompt.
    pub capture_prompt: bool,
    pub toast: Option<String>,
    pub now_playing: Option<String>,
}
