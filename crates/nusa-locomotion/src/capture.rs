/// Mouse-look capture. Look input from the pointer only applies while
/// `Locked`; `Armed` means first-person mode is active and the "click to
/// start" prompt is showing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PointerCapture {
    #[default]
    Disarmed,
    Armed,
    Locked,
}

impl PointerCapture {
    #[inline]
    pub fn is_locked(self) -> bool {
        matches!(self, PointerCapture::Locked)
    }

    #[inline]
    pub fn prompt_visible(self) -> bool {
        matches!(self, PointerCapture::Armed)
    }
}
