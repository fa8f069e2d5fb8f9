use nusa_geom::Vec3;

/// A placed object the player cannot walk through. Only the ground-plane
/// circle matters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub position: Vec3,
    pub radius: f32,
}

impl Obstacle {
    pub const DEFAULT_RADIUS: f32 = 0.3;

    /// Effective radius from a placement scale; unscaled objects use the
    /// default radius.
    pub fn from_scale(position: Vec3, scale: Option<f32>) -> Self {
        Self {
            position,
            radius: scale.map_or(Self::DEFAULT_RADIUS, |s| s * 0.4),
        }
    }
}

/// True when a player circle of `player_radius` at (`x`, `z`) overlaps any
/// obstacle.
pub fn collides(obstacles: &[Obstacle], x: f32, z: f32, player_radius: f32) -> bool {
    obstacles.iter().any(|o| {
        let dx = x - o.position.x;
        let dz = z - o.position.z;
        (dx * dx + dz * dz).sqrt() < player_radius + o.radius
    })
}
