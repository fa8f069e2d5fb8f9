use nusa_geom::Vec3;
use nusa_geom::ease::{ease_in_out_cubic, progress};

use crate::pose::CameraPose;

/// A 0.03-per-frame step at 60 fps.
pub const DEFAULT_TWEEN_SECS: f32 = 1.0 / (0.03 * 60.0);

/// Eased move of both camera position and look target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTween {
    from_position: Vec3,
    from_target: Vec3,
    to_position: Vec3,
    to_target: Vec3,
    duration: f32,
    elapsed: f32,
}

impl CameraTween {
    pub fn new(from: &CameraPose, to_position: Vec3, to_target: Vec3, duration: f32) -> Self {
        Self {
            from_position: from.position,
            from_target: from.target,
            to_position,
            to_target,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advances by `dt` and writes the interpolated pose. Returns `true` once
    /// the end pose has been reached; the final step lands exactly on it.
    pub fn step(&mut self, dt: f32, pose: &mut CameraPose) -> bool {
        self.elapsed += dt.max(0.0);
        let t = progress(self.elapsed, self.duration);
        if t >= 1.0 {
            pose.position = self.to_position;
            pose.target = self.to_target;
            log::trace!("camera tween finished at {:?}", self.to_position);
            return true;
        }
        let e = ease_in_out_cubic(t);
        pose.position = self.from_position.lerp(self.to_position, e);
        pose.target = self.from_target.lerp(self.to_target, e);
        false
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[inline]
    pub fn destination(&self) -> (Vec3, Vec3) {
        (self.to_position, self.to_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_lands_on_destination() {
        let mut pose = CameraPose::overview();
        let to = Vec3::new(2.0, 3.0, 4.0);
        let mut tw = CameraTween::new(&pose, to, Vec3::new(2.0, 0.0, 0.0), DEFAULT_TWEEN_SECS);
        let mut frames = 0;
        while !tw.step(1.0 / 60.0, &mut pose) {
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(pose.position, to);
        assert_eq!(pose.target, Vec3::new(2.0, 0.0, 0.0));
        assert!(tw.is_finished());
    }

    #[test]
    fn midpoint_is_halfway() {
        let mut pose = CameraPose::at(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut tw = CameraTween::new(&pose, Vec3::new(10.0, 0.0, 0.0), pose.target, 2.0);
        tw.step(1.0, &mut pose);
        assert!((pose.position.x - 5.0).abs() < 1e-4);
    }
}
