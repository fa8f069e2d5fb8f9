use nusa_geom::{Rgb, Vec3};

/// Ring-shaped swirl marking where the camera dives in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Portal {
    pub position: Vec3,
    /// Unit normal of the ring plane, pointing at the camera.
    pub normal: Vec3,
    pub scale: f32,
    /// Rotation about the normal, radians.
    pub spin: f32,
    /// Opacity/reveal factor fed to the swirl shading, 0..=1.
    pub progress: f32,
    /// Seconds since the portal appeared; drives the swirl animation.
    pub time: f32,
    pub visible: bool,
}

impl Portal {
    pub const INNER_RADIUS: f32 = 0.5;
    pub const OUTER_RADIUS: f32 = 5.0;
    pub const COLOR_A: Rgb = Rgb::from_hex(0x3b82f6);
    pub const COLOR_B: Rgb = Rgb::from_hex(0x9333ea);

    pub fn hidden() -> Self {
        Self {
            position: Vec3::ZERO,
            normal: Vec3::new(0.0, 0.0, 1.0),
            scale: 0.0,
            spin: 0.0,
            progress: 0.0,
            time: 0.0,
            visible: false,
        }
    }

    /// Shows the portal at `position`, facing `eye`.
    pub fn place(&mut self, position: Vec3, eye: Vec3) {
        let to_eye = eye - position;
        *self = Self {
            position,
            normal: if to_eye.length() > 1e-6 {
                to_eye.normalized()
            } else {
                Vec3::new(0.0, 0.0, 1.0)
            },
            visible: true,
            ..Self::hidden()
        };
    }

    /// Swirl color at a ring parameter `s` in 0..=1 (radius) and angle.
    pub fn swirl_color(&self, s: f32, angle: f32) -> Rgb {
        let wave = (s * 10.0 - self.time * 2.0 + angle * 3.0).sin();
        Self::COLOR_A.lerp(Self::COLOR_B, wave * 0.5 + 0.5)
    }
}

/// Full-screen white overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Flash {
    pub opacity: f32,
}

impl Flash {
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}
