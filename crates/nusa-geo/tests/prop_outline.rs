use nusa_geo::{ExtrudeSettings, Outline, extrude_outline};
use nusa_geom::{Rgb, Vec2};
use proptest::prelude::*;

// Star-shaped polygons around the origin are always simple.
fn star() -> impl Strategy<Value = Vec<Vec2>> {
    prop::collection::vec(0.5f32..3.0, 3..24).prop_map(|radii| {
        let n = radii.len();
        radii
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                Vec2::new(r * a.cos(), r * a.sin())
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn outline_is_ccw_regardless_of_input_winding(mut pts in star(), flip in any::<bool>()) {
        if flip {
            pts.reverse();
        }
        let o = Outline::from_points(pts).expect("star outline");
        prop_assert!(o.area() > 0.0);
    }

    #[test]
    fn extruded_star_is_finite_and_bounded(pts in star()) {
        let o = Outline::from_points(pts).expect("star outline");
        let s = ExtrudeSettings::default();
        let solid = extrude_outline(&o, &[], &s, Rgb::WHITE).expect("extrude");
        prop_assert!(solid.triangle_count() > 0);
        prop_assert!(solid.positions.iter().all(|p| p.is_finite()));
        prop_assert!(solid.normals.iter().all(|n| (n.length() - 1.0).abs() < 1e-3));
        prop_assert!(solid.bounds.min.y >= -s.bevel_thickness - 1e-4);
        prop_assert!(solid.bounds.max.y <= s.depth + s.bevel_thickness + 1e-4);
    }
}
