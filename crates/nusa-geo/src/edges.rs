use hashbrown::HashMap;
use nusa_geom::Vec3;

use crate::extrude::Solid;

/// Line list for the dark outline drawn over each solid.
#[derive(Clone, Debug, Default)]
pub struct EdgeSegments {
    pub segments: Vec<[Vec3; 2]>,
}

impl EdgeSegments {
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

type VertexKey = [i64; 3];

#[inline]
fn key(v: Vec3) -> VertexKey {
    const PRECISION: f32 = 1e4;
    [
        (v.x * PRECISION).round() as i64,
        (v.y * PRECISION).round() as i64,
        (v.z * PRECISION).round() as i64,
    ]
}

struct EdgeEntry {
    a: Vec3,
    b: Vec3,
    normal: Vec3,
    // Set once a second face with a nearly equal normal shares the edge.
    smooth: bool,
    faces: u32,
}

/// Keeps edges bordering exactly one triangle and edges whose two faces
/// meet at more than `threshold_deg` degrees.
pub fn edge_segments(solid: &Solid, threshold_deg: f32) -> EdgeSegments {
    let cos_threshold = threshold_deg.to_radians().cos();
    let mut edges: HashMap<(VertexKey, VertexKey), EdgeEntry> = HashMap::new();
    let mut order: Vec<(VertexKey, VertexKey)> = Vec::new();

    for (tri, normals) in solid
        .positions
        .chunks_exact(3)
        .zip(solid.normals.chunks_exact(3))
    {
        let normal = normals[0];
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let (ka, kb) = (key(a), key(b));
            if ka == kb {
                continue;
            }
            let k = if ka < kb { (ka, kb) } else { (kb, ka) };
            match edges.get_mut(&k) {
                Some(entry) => {
                    entry.faces += 1;
                    if entry.faces == 2 && entry.normal.dot(normal) > cos_threshold {
                        entry.smooth = true;
                    }
                }
                None => {
                    edges.insert(
                        k,
                        EdgeEntry {
                            a,
                            b,
                            normal,
                            smooth: false,
                            faces: 1,
                        },
                    );
                    order.push(k);
                }
            }
        }
    }

    let segments = order
        .iter()
        .filter_map(|k| edges.get(k))
        .filter(|e| !e.smooth)
        .map(|e| [e.a, e.b])
        .collect();
    EdgeSegments { segments }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrude::{ExtrudeSettings, extrude_outline};
    use crate::outline::Outline;
    use nusa_geom::{Rgb, Vec2};

    #[test]
    fn flat_cap_diagonal_is_dropped() {
        let square = Outline::from_points(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ])
        .expect("square");
        let settings = ExtrudeSettings {
            bevel_segments: 0,
            bevel_size: 0.0,
            bevel_thickness: 0.0,
            ..ExtrudeSettings::default()
        };
        let solid = extrude_outline(&square, &[], &settings, Rgb::BLACK).expect("extrude");
        let edges = edge_segments(&solid, 1.0);
        // A plain box outline: 4 top, 4 bottom, 4 vertical.
        assert_eq!(edges.len(), 12);
    }
}
