use nusa_camera::CameraPose;
use nusa_geom::{Aabb, Rgb, Vec3};
use raylib::prelude::{Camera3D, Color, Vector3};

pub fn vec3_to_rl(v: Vec3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

pub fn vec3_from_rl(v: Vector3) -> Vec3 {
    Vec3 {
        x: v.x,
        y: v.y,
        z: v.z,
    }
}

pub fn aabb_to_rl(bb: Aabb) -> raylib::core::math::BoundingBox {
    raylib::core::math::BoundingBox::new(vec3_to_rl(bb.min), vec3_to_rl(bb.max))
}

pub fn color_to_rl(c: Rgb) -> Color {
    Color::new(c.r, c.g, c.b, 255)
}

pub fn color_with_alpha(c: Rgb, alpha: f32) -> Color {
    Color::new(c.r, c.g, c.b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Base color brightened by an emissive term.
pub fn shade(color: Rgb, emissive: Rgb) -> Rgb {
    Rgb::new(
        color.r.saturating_add(emissive.r),
        color.g.saturating_add(emissive.g),
        color.b.saturating_add(emissive.b),
    )
}

/// Baked directional light: brightness byte for a unit normal.
pub fn lambert(n: Vec3) -> u8 {
    const LIGHT: Vec3 = Vec3::new(0.3714, 0.7428, 0.5571);
    let k = 0.55 + 0.45 * n.dot(LIGHT).max(0.0);
    (k * 255.0).round() as u8
}

pub fn camera_to_rl(pose: &CameraPose) -> Camera3D {
    Camera3D::perspective(
        vec3_to_rl(pose.position),
        vec3_to_rl(pose.target),
        Vector3::new(0.0, 1.0, 0.0),
        pose.fov_deg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_saturates() {
        let lit = shade(Rgb::from_hex(0xe0_30_10), Rgb::from_hex(0x555555));
        assert_eq!(lit, Rgb::new(255, 0x85, 0x65));
        assert_eq!(shade(Rgb::from_hex(0x123456), Rgb::BLACK), Rgb::from_hex(0x123456));
    }

    #[test]
    fn lambert_spans_ambient_to_full() {
        assert_eq!(lambert(Vec3::new(0.0, -1.0, 0.0)), 140);
        assert!(lambert(Vec3::new(0.3714, 0.7428, 0.5571)) >= 254);
        assert!(lambert(Vec3::UP) > lambert(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(color_with_alpha(Rgb::WHITE, 2.0).a, 255);
        assert_eq!(color_with_alpha(Rgb::WHITE, -1.0).a, 0);
    }
}
