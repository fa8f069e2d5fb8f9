use std::f32::consts::{FRAC_PI_2, TAU};

use nusa_geom::Vec3;

use crate::pose::CameraPose;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    /// Fraction of the pending rotation applied per update.
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping: 0.05,
            min_distance: 5.0,
            max_distance: 30.0,
            min_polar: 0.0,
            max_polar: FRAC_PI_2,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

/// Orbit-style controller around `pose.target`: drag to rotate, wheel to
/// dolly. Rotation eases out over several updates.
#[derive(Clone, Debug)]
pub struct OrbitController {
    pub config: OrbitConfig,
    enabled: bool,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            config,
            enabled: true,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling also drops any momentum still pending.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.scale = 1.0;
        }
    }

    /// Pointer drag in pixels; a drag across the full viewport height turns
    /// the camera one full revolution.
    pub fn rotate_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx / h * self.config.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.config.rotate_speed;
    }

    /// Mouse wheel; positive moves closer.
    pub fn dolly(&mut self, wheel: f32) {
        if !self.enabled || wheel == 0.0 {
            return;
        }
        let step = 0.95_f32.powf(self.config.zoom_speed * wheel.abs());
        if wheel > 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// Applies pending input to `pose` and enforces distance and polar
    /// limits. Returns whether the pose changed noticeably.
    pub fn update(&mut self, pose: &mut CameraPose) -> bool {
        if !self.enabled {
            return false;
        }
        let c = self.config;
        let offset = pose.position - pose.target;
        let mut radius = offset.length().max(1e-4);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.delta_theta * c.damping;
        phi += self.delta_phi * c.damping;
        phi = phi.clamp(c.min_polar.max(1e-6), c.max_polar.min(std::f32::consts::PI - 1e-6));
        radius = (radius * self.scale).clamp(c.min_distance, c.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        let before = pose.position;
        pose.position = pose.target + new_offset;

        self.delta_theta *= 1.0 - c.damping;
        self.delta_phi *= 1.0 - c.damping;
        self.scale = 1.0;

        before.distance(pose.position) > 1e-4
    }
}
