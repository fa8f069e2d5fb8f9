use nusa_geom::Vec2;

use crate::geojson::Ring;
use crate::projection::Projection;

/// Why a ring could not become a closed outline.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum RingError {
    #[error("ring is empty")]
    Empty,
    #[error("position {0} has fewer than two coordinates")]
    ShortPosition(usize),
    #[error("position {0} is not finite")]
    NonFinite(usize),
    #[error("ring has {0} distinct points, need at least 3")]
    TooFewPoints(usize),
    #[error("ring encloses no area")]
    ZeroArea,
    #[error("triangulation failed")]
    Triangulation,
}

/// A closed planar outline without the repeated closing vertex, wound
/// counter-clockwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    pub points: Vec<Vec2>,
}

impl Outline {
    pub fn from_ring(ring: &Ring, projection: &Projection) -> Result<Self, RingError> {
        if ring.is_empty() {
            return Err(RingError::Empty);
        }
        let mut points: Vec<Vec2> = Vec::with_capacity(ring.len());
        for (i, pos) in ring.iter().enumerate() {
            let [lon, lat, ..] = pos.as_slice() else {
                return Err(RingError::ShortPosition(i));
            };
            if !lon.is_finite() || !lat.is_finite() {
                return Err(RingError::NonFinite(i));
            }
            let p = projection.project(*lon, *lat);
            if points.last().is_some_and(|last| same_point(*last, p)) {
                continue;
            }
            points.push(p);
        }
        Self::from_points(points)
    }

    /// Validates and normalizes already-projected points.
    pub fn from_points(mut points: Vec<Vec2>) -> Result<Self, RingError> {
        while points.len() >= 2 && same_point(points[0], points[points.len() - 1]) {
            points.pop();
        }
        if points.len() < 3 {
            return Err(RingError::TooFewPoints(points.len()));
        }
        let area = signed_area(&points);
        if area.abs() < 1e-12 {
            return Err(RingError::ZeroArea);
        }
        if area < 0.0 {
            points.reverse();
        }
        Ok(Outline { points })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn area(&self) -> f32 {
        signed_area(&self.points)
    }

    /// Same outline wound clockwise, as holes expect.
    pub fn reversed(&self) -> Outline {
        let mut points = self.points.clone();
        points.reverse();
        Outline { points }
    }

    /// Per-vertex offset directions that move each edge outward (to the
    /// right of travel) by one unit, miter-limited at sharp corners.
    pub fn bevel_vectors(&self) -> Vec<Vec2> {
        let n = self.points.len();
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let prev = self.points[(i + n - 1) % n];
            let cur = self.points[i];
            let next = self.points[(i + 1) % n];
            let n0 = right_normal(cur - prev);
            let n1 = right_normal(next - cur);
            let sum = n0 + n1;
            let denom = 1.0 + n0.dot(n1);
            let v = if denom.abs() < 1e-6 {
                n0
            } else {
                sum / denom
            };
            const MITER_LIMIT: f32 = 3.0;
            let len = v.length();
            out.push(if len > MITER_LIMIT { v * (MITER_LIMIT / len) } else { v });
        }
        out
    }
}

#[inline]
fn same_point(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[inline]
fn right_normal(edge: Vec2) -> Vec2 {
    Vec2::new(edge.y, -edge.x).normalized()
}

/// Shoelace area; positive for counter-clockwise winding.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut acc = 0.0_f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        acc += (a.x as f64) * (b.y as f64) - (b.x as f64) * (a.y as f64);
    }
    (acc * 0.5) as f32
}
