use nusa_geom::{Vec2, Vec3};
use nusa_locomotion::{FirstPersonController, LocomotionConfig, MoveInput, Obstacle};
use proptest::prelude::*;

fn open_field() -> FirstPersonController {
    FirstPersonController::new(LocomotionConfig {
        platform_radius: 1.0e6,
        ..LocomotionConfig::default()
    })
}

proptest! {
    #[test]
    fn idle_player_stays_put(dt in 0.0f32..5.0, yaw in -3.0f32..3.0) {
        let mut ctl = FirstPersonController::default();
        let mut s = *ctl.state();
        s.yaw = yaw;
        ctl.set_state(s);
        let before = ctl.state().position;
        ctl.update(dt, &MoveInput::default());
        prop_assert_eq!(ctl.state().position, before);
        prop_assert!(ctl.state().on_ground);
    }

    #[test]
    fn speed_approaches_but_never_exceeds_target(
        run in any::<bool>(),
        strafe in any::<bool>(),
        dts in prop::collection::vec(0.001f32..0.1, 50..200),
    ) {
        let mut ctl = open_field();
        let input = MoveInput { forward: true, right: strafe, shift: run, ..MoveInput::default() };
        let target = if run { ctl.config.run_speed } else { ctl.config.walk_speed };
        let mut total = 0.0;
        for dt in dts {
            ctl.update(dt, &input);
            total += dt;
            prop_assert!(ctl.state().velocity.length() <= target * (1.0 + 1e-5));
        }
        if total > 0.5 {
            prop_assert!(ctl.state().velocity.length() > target * 0.99);
        }
    }

    #[test]
    fn leaving_the_platform_clamps_to_the_edge(
        angle in -3.1f32..3.1,
        r in 11.6f32..30.0,
        speed in 0.0f32..10.0,
        dt in 0.001f32..0.1,
    ) {
        let mut ctl = FirstPersonController::default();
        let mut s = *ctl.state();
        let dir = Vec2::new(angle.cos(), angle.sin());
        s.position = Vec3::new(dir.x * r, s.position.y, dir.y * r);
        s.velocity = dir * speed;
        ctl.set_state(s);
        ctl.update(dt, &MoveInput::default());
        let p = ctl.state().position;
        let radius = (p.x * p.x + p.z * p.z).sqrt();
        prop_assert!((radius - ctl.config.platform_radius).abs() < 1e-3);
        prop_assert_eq!(ctl.state().velocity, Vec2::ZERO);
        // Angle is preserved.
        let got = p.z.atan2(p.x);
        prop_assert!((got - angle).abs() < 1e-3);
    }

    #[test]
    fn obstacle_blocks_every_approach(
        approach in -3.14f32..3.14,
        heading in -3.14f32..3.14,
        speed in 0.0f32..0.5,
        dt in 0.001f32..0.1,
        px in -5.0f32..5.0,
        pz in -5.0f32..5.0,
    ) {
        let mut ctl = FirstPersonController::default();
        let mut s = *ctl.state();
        s.position = Vec3::new(px, s.position.y, pz);
        s.velocity = Vec2::new(heading.cos(), heading.sin()) * speed;
        ctl.set_state(s);
        let offset = Vec3::new(approach.cos(), 0.0, approach.sin()) * 0.2;
        ctl.set_obstacles(vec![Obstacle { position: s.position + offset, radius: 0.3 }]);
        let before = ctl.state().position;
        ctl.update(dt, &MoveInput::default());
        prop_assert_eq!(ctl.state().position.x, before.x);
        prop_assert_eq!(ctl.state().position.z, before.z);
        prop_assert_eq!(ctl.state().velocity, Vec2::ZERO);
    }
}

#[test]
fn collision_wins_over_boundary() {
    let mut ctl = FirstPersonController::default();
    let mut s = *ctl.state();
    s.position = Vec3::new(11.4, s.position.y, 0.0);
    s.velocity = Vec2::new(5.0, 0.0);
    ctl.set_state(s);
    ctl.set_obstacles(vec![Obstacle::from_scale(Vec3::new(11.6, 0.1, 0.0), None)]);
    ctl.update(0.05, &MoveInput::default());
    assert_eq!(ctl.state().position.x, 11.4);
    assert_eq!(ctl.state().velocity, Vec2::ZERO);
}
