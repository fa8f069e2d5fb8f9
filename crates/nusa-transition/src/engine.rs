use std::f32::consts::TAU;

use nusa_camera::CameraPose;
use nusa_content::ContentTables;
use nusa_geom::Vec3;
use nusa_geom::ease::{ease_in_cubic, ease_out_cubic, progress};
use nusa_locomotion::Obstacle;
use rand::Rng;

use crate::loader::ModelLoader;
use crate::portal::{Flash, Portal};
use crate::stage::{Direction, Stage, StageTimings};
use crate::world::{ProvinceWorld, WorldLayout};

/// Fixed vantage point the reverse transition dives through.
pub const REVERSE_PORTAL: Vec3 = Vec3::new(0.0, 3.0, 8.0);
/// Portal height above a forward target.
const PORTAL_HEIGHT: f32 = 1.0;
/// The zoom ends this far above the focus point.
const ZOOM_RISE: f32 = 2.0;
/// Spin rates in radians per second (0.1 and 0.05 per 60 Hz frame).
const ZOOM_SPIN_RATE: f32 = 6.0;
const CLOSE_SPIN_RATE: f32 = 3.0;

/// Reported by [`TransitionEngine::tick`].
#[derive(Debug, PartialEq)]
pub enum TransitionEvent<A> {
    /// The screen is fully white; run the world swap now.
    WorldReady(A),
    /// The portal has closed and the engine is idle again.
    Completed,
}

/// Drives the portal transition one frame at a time and owns the province
/// world. `A` is the caller's world-swap action, handed back when the screen
/// is covered.
#[derive(Debug)]
pub struct TransitionEngine<A> {
    pub timings: StageTimings,
    pub layout: WorldLayout,
    stage: Stage,
    direction: Direction,
    elapsed: f32,
    focus: Vec3,
    zoom_from: Vec3,
    zoom_to: Vec3,
    portal: Portal,
    flash: Flash,
    pending: Option<A>,
    world: Option<ProvinceWorld>,
}

impl<A> Default for TransitionEngine<A> {
    fn default() -> Self {
        Self::new(StageTimings::default(), WorldLayout::default())
    }
}

impl<A> TransitionEngine<A> {
    pub fn new(timings: StageTimings, layout: WorldLayout) -> Self {
        Self {
            timings,
            layout,
            stage: Stage::Idle,
            direction: Direction::Forward,
            elapsed: 0.0,
            focus: Vec3::ZERO,
            zoom_from: Vec3::ZERO,
            zoom_to: Vec3::ZERO,
            portal: Portal::hidden(),
            flash: Flash::default(),
            pending: None,
            world: None,
        }
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.stage != Stage::Idle
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    #[inline]
    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    /// Dives into `target` (a ground point). Rejected while another
    /// transition is running.
    pub fn start_transition(&mut self, target: Vec3, camera: &CameraPose, action: A) -> bool {
        if self.is_transitioning() {
            log::debug!("transition request ignored: {:?} in progress", self.stage);
            return false;
        }
        let portal_at = Vec3::new(target.x, PORTAL_HEIGHT, target.z);
        self.begin(Direction::Forward, target, portal_at, camera, action);
        true
    }

    /// Dives back out through the fixed reverse portal.
    pub fn start_reverse_transition(&mut self, camera: &CameraPose, action: A) -> bool {
        if self.is_transitioning() {
            log::debug!("reverse transition ignored: {:?} in progress", self.stage);
            return false;
        }
        self.begin(Direction::Reverse, REVERSE_PORTAL, REVERSE_PORTAL, camera, action);
        true
    }

    fn begin(
        &mut self,
        direction: Direction,
        focus: Vec3,
        portal_at: Vec3,
        camera: &CameraPose,
        action: A,
    ) {
        log::info!("transition {:?} toward {:?}", direction, focus);
        self.direction = direction;
        self.focus = focus;
        self.zoom_from = camera.position;
        self.zoom_to = focus + Vec3::new(0.0, ZOOM_RISE, 0.0);
        self.portal.place(portal_at, camera.position);
        self.flash = Flash::default();
        self.pending = Some(action);
        self.stage = Stage::Opening;
        self.elapsed = 0.0;
    }

    /// Advances by `dt` seconds. Stages run strictly in order; time left
    /// over at a stage boundary carries into the next stage, except that the
    /// tick stops at the boundary that produces an event.
    pub fn tick(&mut self, dt: f32, camera: &mut CameraPose) -> Option<TransitionEvent<A>> {
        let mut remaining = dt.max(0.0);
        while self.stage != Stage::Idle {
            let duration = self.timings.duration(self.stage);
            let step = remaining.min((duration - self.elapsed).max(0.0));
            self.elapsed += step;
            remaining -= step;
            self.portal.time += step;
            self.apply(step, camera);
            if self.elapsed < duration {
                return None;
            }

            let finished = self.stage;
            self.stage = finished.next();
            self.elapsed = 0.0;
            log::trace!("transition stage {:?} -> {:?}", finished, self.stage);
            match finished {
                Stage::ZoomingIn => {
                    camera.position = self.zoom_to;
                    camera.target = self.focus;
                }
                Stage::Flashing => {
                    self.flash.opacity = 1.0;
                    if let Some(action) = self.pending.take() {
                        return Some(TransitionEvent::WorldReady(action));
                    }
                }
                Stage::Closing => {
                    self.portal.visible = false;
                    self.portal.scale = 0.0;
                    self.flash.opacity = 0.0;
                    log::info!("transition {:?} complete", self.direction);
                    return Some(TransitionEvent::Completed);
                }
                _ => {}
            }
            if self.stage == Stage::ZoomingIn {
                self.zoom_from = camera.position;
            }
        }
        None
    }

    fn apply(&mut self, step: f32, camera: &mut CameraPose) {
        let p = progress(self.elapsed, self.timings.duration(self.stage));
        match self.stage {
            Stage::Idle => {}
            Stage::Opening => {
                let e = ease_out_cubic(p);
                self.portal.progress = e;
                self.portal.scale = e;
                self.portal.spin = e * TAU;
            }
            Stage::ZoomingIn => {
                let e = ease_in_cubic(p);
                camera.position = self.zoom_from.lerp(self.zoom_to, e);
                camera.target = self.focus;
                self.portal.scale = 1.0 + e * 3.0;
                self.portal.spin += ZOOM_SPIN_RATE * (1.0 + e * 2.0) * step;
            }
            Stage::Flashing => self.flash.opacity = p,
            Stage::WorldSwapped => self.flash.opacity = 1.0,
            Stage::FadingIn => self.flash.opacity = 1.0 - ease_out_cubic(p),
            Stage::Closing => {
                self.portal.progress = 1.0 - p;
                self.portal.scale = 1.0 - p;
                self.portal.spin += CLOSE_SPIN_RATE * step;
            }
        }
    }

    #[inline]
    pub fn world(&self) -> Option<&ProvinceWorld> {
        self.world.as_ref()
    }

    /// Builds the world for a province, tearing down any previous one first.
    /// Returns the platform obstacles for the locomotion engine.
    pub fn create_province_world<R: Rng>(
        &mut self,
        province_index: usize,
        name: &str,
        content: &ContentTables,
        loader: &mut dyn ModelLoader,
        rng: &mut R,
    ) -> Vec<Obstacle> {
        self.clear_province_world(loader);
        let world = ProvinceWorld::build(province_index, name, content, loader, rng, &self.layout);
        let obstacles = world.obstacles();
        self.world = Some(world);
        obstacles
    }

    /// Releases every resource held by the current world, if any.
    pub fn clear_province_world(&mut self, loader: &mut dyn ModelLoader) {
        if let Some(world) = self.world.take() {
            world.teardown(loader);
        }
    }

    pub fn animate_province_world(&mut self, dt: f32, eye: Vec3) {
        if let Some(world) = self.world.as_mut() {
            world.animate(dt, eye);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run_until_event<A>(
        engine: &mut TransitionEngine<A>,
        cam: &mut CameraPose,
    ) -> (TransitionEvent<A>, f32) {
        let mut t = 0.0;
        for _ in 0..10_000 {
            t += DT;
            if let Some(ev) = engine.tick(DT, cam) {
                return (ev, t);
            }
        }
        panic!("no event");
    }

    #[test]
    fn forward_sequence_timing_and_events() {
        let mut engine = TransitionEngine::<u32>::default();
        let mut cam = CameraPose::overview();
        let target = Vec3::new(3.0, 0.0, -2.0);
        assert!(engine.start_transition(target, &cam, 7));
        assert_eq!(engine.stage(), Stage::Opening);
        assert!(engine.portal().visible);
        assert_eq!(engine.portal().position, Vec3::new(3.0, 1.0, -2.0));

        let (ev, t) = run_until_event(&mut engine, &mut cam);
        assert_eq!(ev, TransitionEvent::WorldReady(7));
        assert!((t - 2.8).abs() < 2.0 * DT);
        assert_eq!(engine.stage(), Stage::WorldSwapped);
        assert_eq!(engine.flash().opacity, 1.0);
        assert_eq!(cam.position, target + Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(cam.target, target);
        assert!(engine.is_transitioning());

        let (ev, t) = run_until_event(&mut engine, &mut cam);
        assert_eq!(ev, TransitionEvent::Completed);
        assert!((t - 1.4).abs() < 2.0 * DT);
        assert!(!engine.is_transitioning());
        assert!(!engine.portal().visible);
        assert!(!engine.flash().is_visible());
    }

    #[test]
    fn second_request_is_rejected_until_done() {
        let mut engine = TransitionEngine::<&str>::default();
        let mut cam = CameraPose::overview();
        assert!(engine.start_transition(Vec3::ZERO, &cam, "first"));
        assert!(!engine.start_transition(Vec3::new(5.0, 0.0, 5.0), &cam, "second"));
        assert!(!engine.start_reverse_transition(&cam, "third"));
        let mut swaps = Vec::new();
        loop {
            assert!(engine.is_transitioning());
            match engine.tick(DT, &mut cam) {
                Some(TransitionEvent::WorldReady(a)) => swaps.push(a),
                Some(TransitionEvent::Completed) => break,
                None => {}
            }
        }
        assert_eq!(swaps, vec!["first"]);
        assert!(!engine.is_transitioning());
        assert!(engine.start_reverse_transition(&cam, "back"));
    }

    #[test]
    fn huge_dt_still_runs_stages_in_order() {
        let mut engine = TransitionEngine::<()>::default();
        let mut cam = CameraPose::overview();
        engine.start_transition(Vec3::ZERO, &cam, ());
        assert_eq!(engine.tick(100.0, &mut cam), Some(TransitionEvent::WorldReady(())));
        assert_eq!(engine.stage(), Stage::WorldSwapped);
        assert_eq!(engine.tick(100.0, &mut cam), Some(TransitionEvent::Completed));
        assert_eq!(engine.tick(100.0, &mut cam), None);
    }

    #[test]
    fn portal_grows_then_shrinks() {
        let mut engine = TransitionEngine::<()>::default();
        let mut cam = CameraPose::overview();
        engine.start_transition(Vec3::ZERO, &cam, ());
        engine.tick(0.5, &mut cam);
        let half_open = engine.portal().scale;
        assert!(half_open > 0.5 && half_open < 1.0);
        engine.tick(0.5, &mut cam);
        assert_eq!(engine.stage(), Stage::ZoomingIn);
        engine.tick(1.5, &mut cam);
        assert!((engine.portal().scale - 4.0).abs() < 1e-4);
        assert!(engine.flash().opacity < 1e-6);
        engine.tick(0.15, &mut cam);
        assert!((engine.flash().opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn reverse_uses_fixed_portal() {
        let mut engine = TransitionEngine::<()>::default();
        let mut cam = CameraPose::at(Vec3::new(0.0, 0.7, 8.0), Vec3::new(0.0, 0.7, 7.0));
        assert!(engine.start_reverse_transition(&cam, ()));
        assert_eq!(engine.direction(), Direction::Reverse);
        assert_eq!(engine.portal().position, REVERSE_PORTAL);
        let (ev, _) = run_until_event(&mut engine, &mut cam);
        assert_eq!(ev, TransitionEvent::WorldReady(()));
        assert_eq!(cam.position, Vec3::new(0.0, 5.0, 8.0));
    }
}
