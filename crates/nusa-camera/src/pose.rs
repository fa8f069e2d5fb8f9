use nusa_geom::{Ray, Vec2, Vec3};

/// Where the camera is and what it looks at. Always upright (no roll).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::overview()
    }
}

impl CameraPose {
    /// Startup pose above the map, looking at the origin.
    pub fn overview() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 15.0),
            target: Vec3::ZERO,
            fov_deg: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::overview()
        }
    }

    #[inline]
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn forward(&self) -> Vec3 {
        let d = self.target - self.position;
        if d.length() < 1e-6 {
            Vec3::new(0.0, 0.0, -1.0)
        } else {
            d.normalized()
        }
    }

    pub fn right(&self) -> Vec3 {
        let r = self.forward().cross(Vec3::UP);
        if r.length() < 1e-6 {
            // Looking straight up or down.
            Vec3::new(1.0, 0.0, 0.0)
        } else {
            r.normalized()
        }
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalized()
    }

    #[inline]
    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Ray through a point in normalized device coordinates (x right, y up,
    /// both in -1..=1).
    pub fn screen_ray(&self, ndc_x: f32, ndc_y: f32, aspect: f32) -> Ray {
        let half = (self.fov_deg.to_radians() * 0.5).tan();
        let dir = self.forward() + self.right() * (ndc_x * half * aspect) + self.up() * (ndc_y * half);
        Ray::new(self.position, dir)
    }

    /// Same as [`Self::screen_ray`] but from pixel coordinates with the
    /// origin at the top-left.
    pub fn pixel_ray(&self, px: f32, py: f32, width: f32, height: f32) -> Ray {
        let w = width.max(1.0);
        let h = height.max(1.0);
        let ndc_x = px / w * 2.0 - 1.0;
        let ndc_y = 1.0 - py / h * 2.0;
        self.screen_ray(ndc_x, ndc_y, w / h)
    }

    /// Pixel position of a world point, top-left origin. `None` when the
    /// point is behind the camera.
    pub fn project(&self, p: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let w = width.max(1.0);
        let h = height.max(1.0);
        let d = p - self.position;
        let depth = d.dot(self.forward());
        if depth <= self.near {
            return None;
        }
        let half = (self.fov_deg.to_radians() * 0.5).tan();
        let ndc_x = d.dot(self.right()) / (depth * half * (w / h));
        let ndc_y = d.dot(self.up()) / (depth * half);
        Some(Vec2::new((ndc_x + 1.0) * 0.5 * w, (1.0 - ndc_y) * 0.5 * h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_hits_target_direction() {
        let pose = CameraPose::overview();
        let ray = pose.pixel_ray(400.0, 300.0, 800.0, 600.0);
        let f = pose.forward();
        assert!((ray.dir.dot(f) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn screen_edges_spread_by_fov() {
        let pose = CameraPose::overview();
        let top = pose.screen_ray(0.0, 1.0, 1.0);
        let angle = top.dir.dot(pose.forward()).acos().to_degrees();
        assert!((angle - 30.0).abs() < 1e-3);
        let right = pose.screen_ray(1.0, 0.0, 1.0);
        assert!(right.dir.dot(pose.right()) > 0.0);
    }

    #[test]
    fn project_inverts_pixel_ray() {
        let pose = CameraPose::at(Vec3::new(2.0, 6.0, 9.0), Vec3::new(-1.0, 0.0, 1.0));
        let ray = pose.pixel_ray(200.0, 450.0, 800.0, 600.0);
        let px = pose.project(ray.at(12.0), 800.0, 600.0).expect("in front");
        assert!((px.x - 200.0).abs() < 1e-2);
        assert!((px.y - 450.0).abs() < 1e-2);
        assert!(pose.project(pose.position - pose.forward(), 800.0, 600.0).is_none());
    }

    #[test]
    fn basis_is_orthonormal() {
        let pose = CameraPose::at(Vec3::new(3.0, 4.0, -2.0), Vec3::new(-1.0, 0.0, 5.0));
        let (f, r, u) = (pose.forward(), pose.right(), pose.up());
        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!(u.y > 0.0);
    }
}
