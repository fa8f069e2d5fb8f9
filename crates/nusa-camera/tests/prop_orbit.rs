use nusa_camera::{CameraPose, OrbitController};
use nusa_geom::Vec3;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Input {
    Drag(f32, f32),
    Wheel(f32),
    Settle,
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Input::Drag(x, y)),
        (-10.0f32..10.0).prop_map(Input::Wheel),
        Just(Input::Settle),
    ]
}

proptest! {
    #[test]
    fn orbit_stays_within_limits(inputs in prop::collection::vec(input(), 1..120)) {
        let mut ctl = OrbitController::default();
        let limits = ctl.config;
        let mut pose = CameraPose::overview();
        for i in inputs {
            match i {
                Input::Drag(dx, dy) => ctl.rotate_pixels(dx, dy, 720.0),
                Input::Wheel(w) => ctl.dolly(w),
                Input::Settle => {}
            }
            ctl.update(&mut pose);
            let d = pose.distance_to_target();
            prop_assert!(d >= limits.min_distance - 1e-3 && d <= limits.max_distance + 1e-3);
            prop_assert!(pose.position.y >= pose.target.y - 1e-3);
            prop_assert_eq!(pose.target, Vec3::ZERO);
        }
    }
}
