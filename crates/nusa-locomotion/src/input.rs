use nusa_geom::Vec2;

/// One frame of first-person input, already mapped from devices.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Run on foot, descend while flying.
    pub shift: bool,
    /// Jump key went down this frame.
    pub jump_pressed: bool,
    /// Jump key is held; ascends while flying.
    pub jump_held: bool,
    pub look_left: bool,
    pub look_right: bool,
    pub look_up: bool,
    pub look_down: bool,
    /// Raw pointer movement in pixels since last frame.
    pub pointer_delta: Vec2,
}

impl MoveInput {
    /// (strafe, advance) in -1..=1 before normalization.
    pub(crate) fn intent(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.right, self.left), axis(self.forward, self.backward))
    }
}
