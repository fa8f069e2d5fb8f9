use std::f32::consts::FRAC_PI_2;

use nusa_geom::{Aabb, Ray, Rgb, Vec2, Vec3};

use crate::outline::{Outline, RingError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtrudeSettings {
    pub depth: f32,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_segments: u32,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            depth: 0.3,
            bevel_thickness: 0.05,
            bevel_size: 0.05,
            bevel_segments: 2,
        }
    }
}

impl ExtrudeSettings {
    /// `(outline offset, extrusion height)` per vertex layer, bottom to top.
    fn layers(&self) -> Vec<(f32, f32)> {
        let segs = self.bevel_segments;
        let mut layers = Vec::with_capacity(2 * segs as usize + 2);
        for b in 0..segs {
            let t = b as f32 / segs as f32 * FRAC_PI_2;
            layers.push((self.bevel_size * t.sin(), -self.bevel_thickness * t.cos()));
        }
        layers.push((self.bevel_size, 0.0));
        layers.push((self.bevel_size, self.depth));
        for b in (0..segs).rev() {
            let t = b as f32 / segs as f32 * FRAC_PI_2;
            layers.push((
                self.bevel_size * t.sin(),
                self.depth + self.bevel_thickness * t.cos(),
            ));
        }
        layers
    }
}

/// Flat-shaded triangle soup in world space. Every three consecutive
/// positions form one triangle; normals are per vertex but equal within a
/// triangle.
#[derive(Clone, Debug)]
pub struct Solid {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub color: Rgb,
    pub bounds: Aabb,
}

impl Solid {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Nearest hit distance along `ray`, if any.
    pub fn ray_hit(&self, ray: &Ray) -> Option<f32> {
        self.bounds.ray_hit(ray)?;
        self.triangles()
            .filter_map(|[a, b, c]| ray.intersect_triangle(a, b, c))
            .min_by(f32::total_cmp)
    }

    fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, outward: Vec3) {
        let n = (b - a).cross(c - a);
        if n.length() < 1e-12 {
            return;
        }
        let (b, c, n) = if n.dot(outward) < 0.0 { (c, b, -n) } else { (b, c, n) };
        let n = n.normalized();
        self.positions.extend([a, b, c]);
        self.normals.extend([n, n, n]);
    }
}

/// Shape plane (x east, y north, z extrusion) to world: a -90° turn about X,
/// so extrusion becomes height and north becomes -z.
#[inline]
fn to_world(p: Vec2, z: f32) -> Vec3 {
    Vec3::new(p.x, z, -p.y)
}

/// Extrudes a counter-clockwise outer outline with optional holes into a
/// bevelled solid lying on the ground plane.
pub fn extrude_outline(
    outer: &Outline,
    holes: &[Outline],
    settings: &ExtrudeSettings,
    color: Rgb,
) -> Result<Solid, RingError> {
    let holes: Vec<Outline> = holes.iter().map(Outline::reversed).collect();
    let layers = settings.layers();

    let mut solid = Solid {
        positions: Vec::new(),
        normals: Vec::new(),
        color,
        bounds: Aabb::default(),
    };

    for contour in std::iter::once(outer).chain(holes.iter()) {
        push_walls(&mut solid, contour, &layers);
    }
    push_caps(&mut solid, outer, &holes, &layers)?;

    solid.bounds =
        Aabb::from_points(solid.positions.iter().copied()).ok_or(RingError::Triangulation)?;
    Ok(solid)
}

fn push_walls(solid: &mut Solid, contour: &Outline, layers: &[(f32, f32)]) {
    let bevel = contour.bevel_vectors();
    let n = contour.len();
    let at = |layer: usize, i: usize| {
        let (offset, z) = layers[layer];
        to_world(contour.points[i] + bevel[i] * offset, z)
    };
    for i in 0..n {
        let j = (i + 1) % n;
        let edge = contour.points[j] - contour.points[i];
        let out2 = Vec2::new(edge.y, -edge.x);
        let outward = Vec3::new(out2.x, 0.0, -out2.y);
        for l in 0..layers.len() - 1 {
            let a = at(l, i);
            let b = at(l, j);
            let c = at(l + 1, j);
            let d = at(l + 1, i);
            solid.push_triangle(a, b, c, outward);
            solid.push_triangle(a, c, d, outward);
        }
    }
}

fn push_caps(
    solid: &mut Solid,
    outer: &Outline,
    holes: &[Outline],
    layers: &[(f32, f32)],
) -> Result<(), RingError> {
    let mut flat: Vec<f64> = Vec::new();
    let mut hole_starts = Vec::with_capacity(holes.len());
    let mut points: Vec<Vec2> = Vec::new();
    for (k, contour) in std::iter::once(outer).chain(holes.iter()).enumerate() {
        if k > 0 {
            hole_starts.push(points.len());
        }
        for p in &contour.points {
            flat.push(p.x as f64);
            flat.push(p.y as f64);
            points.push(*p);
        }
    }
    let indices = earcutr::earcut(&flat, &hole_starts, 2).map_err(|_| RingError::Triangulation)?;
    if indices.is_empty() {
        return Err(RingError::Triangulation);
    }

    let bottom = layers.first().map_or(0.0, |l| l.1);
    let top = layers.last().map_or(0.0, |l| l.1);
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [points[tri[0]], points[tri[1]], points[tri[2]]];
        solid.push_triangle(to_world(a, top), to_world(b, top), to_world(c, top), Vec3::UP);
        solid.push_triangle(
            to_world(a, bottom),
            to_world(b, bottom),
            to_world(c, bottom),
            -Vec3::UP,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32) -> Outline {
        Outline::from_points(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(size, 0.0),
            Vec2::new(size, size),
            Vec2::new(0.0, size),
        ])
        .expect("square")
    }

    #[test]
    fn layers_span_bevel_to_bevel() {
        let s = ExtrudeSettings::default();
        let layers = s.layers();
        assert_eq!(layers.len(), 6);
        assert!((layers[0].1 + 0.05).abs() < 1e-6);
        assert_eq!(layers[0].0, 0.0);
        assert!((layers[5].1 - 0.35).abs() < 1e-6);
        assert!(layers.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn square_solid_bounds_include_bevel() {
        let solid = extrude_outline(&square(1.0), &[], &ExtrudeSettings::default(), Rgb::WHITE)
            .expect("extrude");
        assert_eq!(solid.positions.len(), solid.normals.len());
        assert_eq!(solid.positions.len() % 3, 0);
        let b = solid.bounds;
        assert!((b.min.y + 0.05).abs() < 1e-5);
        assert!((b.max.y - 0.35).abs() < 1e-5);
        // Bevel pushes walls out by bevel_size along the miter.
        assert!(b.min.x < -0.04 && b.max.x > 1.04);
        // North maps to -z.
        assert!(b.min.z < -1.0 && b.max.z > 0.0);
    }

    #[test]
    fn top_faces_point_up() {
        let solid = extrude_outline(&square(1.0), &[], &ExtrudeSettings::default(), Rgb::WHITE)
            .expect("extrude");
        let up = solid
            .positions
            .chunks_exact(3)
            .zip(solid.normals.chunks_exact(3))
            .filter(|(p, _)| p.iter().all(|v| (v.y - 0.35).abs() < 1e-5))
            .count();
        assert_eq!(up, 2);
        for (p, n) in solid.positions.iter().zip(&solid.normals) {
            if (p.y - 0.35).abs() < 1e-5 && n.y.abs() > 0.99 {
                assert!(n.y > 0.0);
            }
        }
    }

    #[test]
    fn hole_removes_cap_area() {
        let hole = Outline::from_points(vec![
            Vec2::new(0.4, 0.4),
            Vec2::new(0.6, 0.4),
            Vec2::new(0.6, 0.6),
            Vec2::new(0.4, 0.6),
        ])
        .expect("hole");
        let solid = extrude_outline(&square(1.0), &[hole], &ExtrudeSettings::default(), Rgb::WHITE)
            .expect("extrude");
        let down = Ray::new(Vec3::new(0.5, 5.0, -0.5), -Vec3::UP);
        assert_eq!(solid.ray_hit(&down), None);
        let down_solid = Ray::new(Vec3::new(0.2, 5.0, -0.2), -Vec3::UP);
        let t = solid.ray_hit(&down_solid).expect("hits cap");
        assert!((t - (5.0 - 0.35)).abs() < 1e-4);
    }
}
