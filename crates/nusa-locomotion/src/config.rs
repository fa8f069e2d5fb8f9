use std::f32::consts::FRAC_PI_2;

use nusa_geom::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub fly_speed: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    /// Rate (1/s) at which horizontal velocity approaches the target.
    pub acceleration: f32,
    pub ground_friction: f32,
    pub air_friction: f32,
    /// Velocity components below this snap to zero while coasting.
    pub stop_epsilon: f32,
    pub bob_speed: f32,
    pub bob_amount: f32,
    /// Phase multiplier per 60 Hz frame while not bobbing.
    pub bob_damping: f32,
    /// Radians per pixel of pointer movement.
    pub mouse_sensitivity: f32,
    /// Radians per second from the look keys.
    pub look_key_speed: f32,
    pub max_pitch: f32,
    pub platform_radius: f32,
    pub ground_level: f32,
    pub eye_height: f32,
    pub player_radius: f32,
    /// Max seconds between jump presses that toggles flight.
    pub double_tap_window: f32,
    pub toast_secs: f32,
    pub spawn_position: Vec3,
    pub spawn_yaw: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 10.0,
            fly_speed: 15.0,
            gravity: 20.0,
            jump_speed: 8.0,
            acceleration: 40.0,
            ground_friction: 8.0,
            air_friction: 2.0,
            stop_epsilon: 0.01,
            bob_speed: 8.0,
            bob_amount: 0.015,
            bob_damping: 0.9,
            mouse_sensitivity: 0.002,
            look_key_speed: 1.8,
            max_pitch: FRAC_PI_2 - 0.1,
            platform_radius: 11.5,
            ground_level: 0.2,
            eye_height: 0.5,
            player_radius: 0.2,
            double_tap_window: 0.3,
            toast_secs: 1.5,
            spawn_position: Vec3::new(0.0, 0.7, 8.0),
            spawn_yaw: 0.0,
        }
    }
}

impl LocomotionConfig {
    /// Eye height when standing on the platform.
    #[inline]
    pub fn standing_eye_y(&self) -> f32 {
        self.ground_level + self.eye_height
    }
}
