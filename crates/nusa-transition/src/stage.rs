/// Transition stages in the order they run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    Opening,
    ZoomingIn,
    Flashing,
    WorldSwapped,
    FadingIn,
    Closing,
}

impl Stage {
    #[inline]
    pub fn next(self) -> Stage {
        match self {
            Stage::Idle => Stage::Idle,
            Stage::Opening => Stage::ZoomingIn,
            Stage::ZoomingIn => Stage::Flashing,
            Stage::Flashing => Stage::WorldSwapped,
            Stage::WorldSwapped => Stage::FadingIn,
            Stage::FadingIn => Stage::Closing,
            Stage::Closing => Stage::Idle,
        }
    }
}

/// Into a province, or back to the overview.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Seconds per stage.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StageTimings {
    pub opening: f32,
    pub zooming: f32,
    pub flashing: f32,
    /// Pause on full white after the swap before fading back.
    pub hold: f32,
    pub fading: f32,
    pub closing: f32,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            opening: 1.0,
            zooming: 1.5,
            flashing: 0.3,
            hold: 0.1,
            fading: 0.5,
            closing: 0.8,
        }
    }
}

impl StageTimings {
    pub fn duration(&self, stage: Stage) -> f32 {
        match stage {
            Stage::Idle => 0.0,
            Stage::Opening => self.opening,
            Stage::ZoomingIn => self.zooming,
            Stage::Flashing => self.flashing,
            Stage::WorldSwapped => self.hold,
            Stage::FadingIn => self.fading,
            Stage::Closing => self.closing,
        }
    }

    pub fn total(&self) -> f32 {
        self.opening + self.zooming + self.flashing + self.hold + self.fading + self.closing
    }
}
