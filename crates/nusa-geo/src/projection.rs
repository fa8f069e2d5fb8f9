use nusa_geom::{Vec2, Vec3};

/// Equirectangular approximation around a fixed center; fine at country
/// scale, not globally accurate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub center_lon: f64,
    pub center_lat: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            scale: 0.15,
            center_lon: 118.0,
            center_lat: -2.5,
        }
    }
}

impl Projection {
    /// Shape-plane coordinates: x grows east, y grows north.
    #[inline]
    pub fn project(&self, lon: f64, lat: f64) -> Vec2 {
        Vec2::new(
            ((lon - self.center_lon) * self.scale) as f32,
            ((lat - self.center_lat) * self.scale) as f32,
        )
    }

    /// World position of a geographic point. The shape plane is laid on the
    /// ground so that north maps to -z, matching the extruded solids.
    #[inline]
    pub fn to_world(&self, lon: f64, lat: f64, height: f32) -> Vec3 {
        let p = self.project(lon, lat);
        Vec3::new(p.x, height, -p.y)
    }
}
