use nusa_geom::{Vec2, Vec3};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn approx_zero_scaled(val: f32, scale: f32, atol: f32, rtol: f32) -> bool {
    val.abs() <= atol + rtol * scale
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e3)
}

fn bounded_nonzero_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded_nonzero", |v| v.is_finite() && {
        let a = v.abs();
        a >= 1e-3 && a <= 1e3
    })
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32())
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_nondegenerate_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_nonzero_f32(), bounded_nonzero_f32(), bounded_nonzero_f32())
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Addition commutativity: a + b == b + a (element-wise)
    #[test]
    fn vec3_add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-5));
    }

    // Cross orthogonality: a·(a×b) = 0
    #[test]
    fn vec3_cross_orthogonal(a in arb_nondegenerate_vec3(), b in arb_nondegenerate_vec3()) {
        let c = a.cross(b);
        let scale = a.length() * c.length();
        prop_assert!(approx_zero_scaled(a.dot(c), scale, 1e-5, 1e-4));
    }

    // Rotations preserve length
    #[test]
    fn vec3_rotations_preserve_length(v in arb_vec3(), angle in -10.0f32..10.0) {
        let len = v.length();
        let tol = 1e-4 * len.max(1.0);
        prop_assert!(approx(v.rotate_x(angle).length(), len, tol));
        prop_assert!(approx(v.rotate_y(angle).length(), len, tol));
    }

    // Lerp stays on the segment
    #[test]
    fn vec3_lerp_on_segment(a in arb_vec3(), b in arb_vec3(), t in 0.0f32..=1.0) {
        let p = a.lerp(b, t);
        let total = a.distance(b);
        let sum = a.distance(p) + p.distance(b);
        prop_assert!(approx(sum, total, 1e-2 * total.max(1.0)));
    }

    // Normalized 2D length is 1 for non-zero vectors
    #[test]
    fn vec2_normalized_length(x in bounded_nonzero_f32(), y in bounded_nonzero_f32()) {
        let n = Vec2::new(x, y).normalized();
        prop_assert!(approx(n.length(), 1.0, 1e-4));
    }
}
