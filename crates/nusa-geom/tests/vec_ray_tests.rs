use nusa_geom::{Aabb, Ray, Vec2, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
}

#[test]
fn vec3_lerp_and_distance() {
    let a = Vec3::new(0.0, 10.0, 15.0);
    let b = Vec3::new(2.0, 2.0, -1.0);
    assert!(vec3_approx_eq(a.lerp(b, 0.0), a, 1e-6));
    assert!(vec3_approx_eq(a.lerp(b, 1.0), b, 1e-6));
    assert!(approx_eq(Vec3::new(3.0, 4.0, 0.0).distance(Vec3::ZERO), 5.0, 1e-6));
}

#[test]
fn vec3_rotate_x_quarter_turn_maps_y_to_z() {
    let v = Vec3::new(1.0, 2.0, 0.0).rotate_x(core::f32::consts::FRAC_PI_2);
    assert!(vec3_approx_eq(v, Vec3::new(1.0, 0.0, 2.0), 1e-5));
    let w = Vec3::new(0.0, 0.0, 3.0).rotate_x(-core::f32::consts::FRAC_PI_2);
    assert!(vec3_approx_eq(w, Vec3::new(0.0, 3.0, 0.0), 1e-5));
}

#[test]
fn vec3_rotate_y_quarter_turn() {
    let v = Vec3::new(1.0, 0.0, 0.0).rotate_y(core::f32::consts::FRAC_PI_2);
    assert!(vec3_approx_eq(v, Vec3::new(0.0, 0.0, -1.0), 1e-5));
}

#[test]
fn vec2_perp_dot_sign() {
    let a = Vec2::new(1.0, 0.0);
    let b = Vec2::new(0.0, 1.0);
    assert!(a.perp_dot(b) > 0.0);
    assert!(b.perp_dot(a) < 0.0);
}

#[test]
fn aabb_from_points_and_center() {
    let bb = Aabb::from_points([
        Vec3::new(-1.0, 0.0, 2.0),
        Vec3::new(3.0, 1.0, -2.0),
        Vec3::new(0.0, -1.0, 0.0),
    ])
    .expect("non-empty");
    assert!(vec3_approx_eq(bb.min, Vec3::new(-1.0, -1.0, -2.0), 1e-6));
    assert!(vec3_approx_eq(bb.max, Vec3::new(3.0, 1.0, 2.0), 1e-6));
    assert!(vec3_approx_eq(bb.center(), Vec3::new(1.0, 0.0, 0.0), 1e-6));
    assert!(Aabb::from_points(std::iter::empty()).is_none());
}

#[test]
fn aabb_ray_hit_and_miss() {
    let bb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
    let hit = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
    assert!(approx_eq(bb.ray_hit(&hit).expect("hit"), 9.0, 1e-5));
    let miss = Ray::new(Vec3::new(5.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
    assert!(bb.ray_hit(&miss).is_none());
}

#[test]
fn ray_triangle_two_sided() {
    let a = Vec3::new(-1.0, 0.0, -1.0);
    let b = Vec3::new(1.0, 0.0, -1.0);
    let c = Vec3::new(0.0, 0.0, 1.0);
    let down = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
    let up = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    assert!(approx_eq(down.intersect_triangle(a, b, c).expect("hit"), 5.0, 1e-5));
    assert!(approx_eq(up.intersect_triangle(a, b, c).expect("hit"), 5.0, 1e-5));
    let away = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    assert!(away.intersect_triangle(a, b, c).is_none());
    assert!(approx_eq(down.at(5.0).y, 0.0, 1e-5));
}
