use std::collections::HashMap;
use std::path::Path;

use nusa_camera::{CameraPose, CameraTween, DEFAULT_TWEEN_SECS, OrbitConfig, OrbitController};
use nusa_content::ContentTables;
use nusa_geo::{ExtrudeSettings, FeatureCollection, GeoError, GeometryBuilder, Projection};
use nusa_geom::{Rgb, Vec3};
use nusa_locomotion::{FirstPersonController, LocomotionConfig, MoveInput, PointerCapture};
use nusa_regions::{RegionId, RegionRegistry, load_regions};
use nusa_transition::{ModelLoader, StageTimings, TransitionEngine, TransitionEvent, WorldLayout};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::event::{Event, EventQueue};
use crate::hud::{Banner, HudStats};
use crate::music::{MusicDeck, Soundtrack};

/// Province-world sky colors, one picked per visit.
pub const BACKGROUNDS: [Rgb; 4] = [
    Rgb::from_hex(0x0f172a),
    Rgb::from_hex(0x1e1b4b),
    Rgb::from_hex(0x1e3a8a),
    Rgb::from_hex(0x581c87),
];

/// Camera offset from a region anchor when zooming to it.
const ZOOM_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 4.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Overview,
    FirstPerson,
}

/// Work deferred until the transition flash covers the screen.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldSwap {
    Enter {
        region: RegionId,
        province_index: usize,
        name: String,
    },
    Exit,
}

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    Geo(#[from] GeoError),
    #[error("none of the {0} features produced a region")]
    NoRegions(usize),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SceneConfig {
    pub projection: Projection,
    pub extrude: ExtrudeSettings,
    pub orbit: OrbitConfig,
    pub locomotion: LocomotionConfig,
    pub timings: StageTimings,
    pub layout: WorldLayout,
    pub seed: u64,
    pub muted: bool,
}

pub struct Scene {
    pub camera: CameraPose,
    registry: RegionRegistry,
    content: ContentTables,
    orbit: OrbitController,
    tween: Option<CameraTween>,
    transition: TransitionEngine<WorldSwap>,
    locomotion: FirstPersonController,
    music: MusicDeck,
    mode: Mode,
    background: Option<Rgb>,
    banner: Option<Banner>,
    entering: Option<String>,
    queue: EventQueue,
    rng: StdRng,
    evt_processed_total: usize,
    evt_processed_by: HashMap<&'static str, usize>,
}

impl Scene {
    /// Reads the province geometry from disk. Failure here is fatal to the
    /// map and is handed to the caller.
    pub fn load(
        geojson: impl AsRef<Path>,
        content: ContentTables,
        config: SceneConfig,
    ) -> Result<Self, SceneError> {
        let collection = FeatureCollection::from_path(geojson)?;
        Self::new(&collection, content, config)
    }

    pub fn new(
        collection: &FeatureCollection,
        content: ContentTables,
        config: SceneConfig,
    ) -> Result<Self, SceneError> {
        let builder = GeometryBuilder::new(config.projection, config.extrude);
        let registry = load_regions(collection, &builder, |i| content.name(i));
        if registry.is_empty() {
            return Err(SceneError::NoRegions(collection.features.len()));
        }
        Ok(Self {
            camera: CameraPose::overview(),
            registry,
            content,
            orbit: OrbitController::new(config.orbit),
            tween: None,
            transition: TransitionEngine::new(config.timings, config.layout),
            locomotion: FirstPersonController::new(config.locomotion),
            music: MusicDeck::new(config.muted),
            mode: Mode::Overview,
            background: None,
            banner: None,
            entering: None,
            queue: EventQueue::new(),
            rng: StdRng::seed_from_u64(config.seed),
            evt_processed_total: 0,
            evt_processed_by: HashMap::new(),
        })
    }

    #[inline]
    pub fn emit(&mut self, event: Event) {
        self.queue.emit_now(event);
    }

    #[inline]
    pub fn queue_mut(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    #[inline]
    pub fn content(&self) -> &ContentTables {
        &self.content
    }

    /// New tables apply from the next world built.
    pub fn set_content(&mut self, content: ContentTables) {
        self.content = content;
    }

    #[inline]
    pub fn transition(&self) -> &TransitionEngine<WorldSwap> {
        &self.transition
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_transitioning()
    }

    #[inline]
    pub fn locomotion(&self) -> &FirstPersonController {
        &self.locomotion
    }

    #[inline]
    pub fn capture(&self) -> PointerCapture {
        self.locomotion.capture()
    }

    #[inline]
    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    #[inline]
    pub fn background(&self) -> Option<Rgb> {
        self.background
    }

    #[inline]
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    #[inline]
    pub fn music(&self) -> &MusicDeck {
        &self.music
    }

    pub fn events_processed(&self) -> usize {
        self.evt_processed_total
    }

    /// Processed count for one event kind, keyed by [`Event::name`].
    pub fn events_processed_of(&self, name: &str) -> usize {
        self.evt_processed_by.get(name).copied().unwrap_or(0)
    }

    pub fn hud_stats(&self) -> HudStats {
        HudStats {
            province_count: self.registry.feature_count(),
            solid_count: self.registry.len(),
            selected: self
                .registry
                .selected()
                .and_then(|id| self.registry.get(id))
                .map(|r| r.name.clone()),
            camera_distance: self.camera.distance_to_target(),
            mode: self.mode,
            transitioning: self.transition.is_transitioning(),
            capture_prompt: self.mode == Mode::FirstPerson
                && !self.transition.is_transitioning()
                && self.locomotion.capture().prompt_visible(),
            toast: self.locomotion.toast().map(|t| t.text.clone()),
            now_playing: self.music.current().map(str::to_string),
        }
    }

    /// One frame: queued events, transition, locomotion, world animation,
    /// then the overview camera.
    pub fn update(
        &mut self,
        dt: f32,
        input: &MoveInput,
        loader: &mut dyn ModelLoader,
        audio: &mut dyn Soundtrack,
    ) {
        let dt = dt.max(0.0);
        while let Some(env) = self.queue.pop_ready() {
            Self::log_event(env.tick, &env.kind);
            *self.evt_processed_by.entry(env.kind.name()).or_insert(0) += 1;
            self.evt_processed_total += 1;
            self.handle_event(env.kind, loader);
        }
        self.queue.advance_tick();

        match self.transition.tick(dt, &mut self.camera) {
            Some(TransitionEvent::WorldReady(swap)) => self.swap_world(swap, loader, audio),
            Some(TransitionEvent::Completed) => {
                if let Some(name) = self.entering.take() {
                    self.banner = Some(Banner::welcome(&name));
                }
            }
            None => {}
        }

        let transitioning = self.transition.is_transitioning();
        if self.mode == Mode::FirstPerson && !transitioning {
            self.locomotion.update(dt, input);
            self.locomotion.apply_to(&mut self.camera);
        }

        self.transition.animate_province_world(dt, self.camera.position);

        if self.mode == Mode::Overview && !transitioning {
            if let Some(tween) = self.tween.as_mut() {
                if tween.step(dt, &mut self.camera) {
                    self.tween = None;
                }
            } else {
                self.orbit.update(&mut self.camera);
            }
        }

        if let Some(banner) = self.banner.as_mut() {
            if !banner.tick(dt) {
                self.banner = None;
            }
        }
        self.music.update(dt, audio);
    }

    fn handle_event(&mut self, event: Event, loader: &mut dyn ModelLoader) {
        match event {
            Event::PointerMoved { ray } => {
                if self.can_pick() {
                    let hit = self.registry.pick(&ray).map(|h| h.region);
                    if hit != self.registry.hovered() {
                        self.registry.set_hovered(hit);
                    }
                }
            }
            Event::Clicked => match self.mode {
                Mode::Overview => self.select_hovered(),
                Mode::FirstPerson => {
                    if !self.transition.is_transitioning() && self.locomotion.engage() {
                        log::debug!("pointer captured");
                    }
                }
            },
            Event::OrbitDragged {
                dx,
                dy,
                viewport_height,
            } => {
                if self.can_steer() {
                    self.orbit.rotate_pixels(dx, dy, viewport_height);
                }
            }
            Event::Wheel { delta } => {
                if self.can_steer() {
                    self.orbit.dolly(delta);
                }
            }
            Event::CaptureReleased => self.locomotion.release(),
            Event::ExitRequested => self.exit_world(),
            Event::ResetViewRequested => self.reset_view(loader),
            Event::ZoomToRegion { id } => self.zoom_to_region(id),
            Event::LabelsToggled => {
                self.registry.toggle_labels();
            }
            Event::MuteToggled => {
                self.music.toggle_mute();
            }
        }
    }

    fn log_event(tick: u64, ev: &Event) {
        match ev {
            Event::PointerMoved { .. } | Event::OrbitDragged { .. } | Event::Wheel { .. } => {
                log::trace!(target: "events", "[tick {}] {}", tick, ev.name());
            }
            Event::ZoomToRegion { id } => {
                log::info!(target: "events", "[tick {}] ZoomToRegion id={}", tick, id.0);
            }
            _ => log::info!(target: "events", "[tick {}] {}", tick, ev.name()),
        }
    }

    #[inline]
    fn can_pick(&self) -> bool {
        self.mode == Mode::Overview
            && !self.transition.is_transitioning()
            && self.registry.is_visible()
    }

    #[inline]
    fn can_steer(&self) -> bool {
        self.can_pick() && self.tween.is_none()
    }

    fn select_hovered(&mut self) {
        if self.transition.is_transitioning() {
            return;
        }
        let Some(region) = self.registry.hovered().and_then(|id| self.registry.get(id)) else {
            return;
        };
        let id = region.id;
        let anchor = region.anchor;
        let swap = WorldSwap::Enter {
            region: id,
            province_index: region.feature_index,
            name: region.name.clone(),
        };
        log::info!("entering {} (region {})", region.name, id.0);
        self.registry.set_selected(Some(id));
        self.orbit.set_enabled(false);
        self.tween = None;
        self.transition.start_transition(anchor, &self.camera, swap);
    }

    fn exit_world(&mut self) {
        if self.mode != Mode::FirstPerson {
            return;
        }
        if self.transition.start_reverse_transition(&self.camera, WorldSwap::Exit) {
            log::info!("leaving province world");
        }
    }

    fn swap_world(&mut self, swap: WorldSwap, loader: &mut dyn ModelLoader, audio: &mut dyn Soundtrack) {
        match swap {
            WorldSwap::Enter {
                region,
                province_index,
                name,
            } => {
                self.registry.set_visible(false);
                self.background = Some(BACKGROUNDS[self.rng.gen_range(0..BACKGROUNDS.len())]);
                let obstacles = self.transition.create_province_world(
                    province_index,
                    &name,
                    &self.content,
                    loader,
                    &mut self.rng,
                );
                self.locomotion.set_obstacles(obstacles);
                self.locomotion.reset();
                self.locomotion.apply_to(&mut self.camera);
                self.orbit.set_enabled(false);
                self.locomotion.arm();
                self.mode = Mode::FirstPerson;
                self.music.play(
                    self.content.music_for(province_index),
                    &self.content.fallback_music,
                    audio,
                );
                log::info!("world swapped in for {} (region {})", name, region.0);
                self.entering = Some(name);
            }
            WorldSwap::Exit => {
                self.leave_world(loader);
                self.camera = CameraPose::overview();
                log::info!("back to the overview");
            }
        }
    }

    /// Drops the province world and brings the map back.
    fn leave_world(&mut self, loader: &mut dyn ModelLoader) {
        self.transition.clear_province_world(loader);
        self.locomotion.set_obstacles(Vec::new());
        self.locomotion.disarm();
        self.music.stop();
        self.registry.set_visible(true);
        // Selection first so the hover restore reaches the entered region.
        self.registry.set_selected(None);
        self.registry.set_hovered(None);
        self.background = None;
        self.banner = None;
        self.entering = None;
        self.orbit.set_enabled(true);
        self.mode = Mode::Overview;
    }

    fn reset_view(&mut self, loader: &mut dyn ModelLoader) {
        if self.transition.is_transitioning() {
            log::debug!("reset ignored during transition");
            return;
        }
        if self.mode == Mode::FirstPerson {
            self.leave_world(loader);
        }
        self.registry.set_selected(None);
        self.registry.set_hovered(None);
        self.background = None;
        self.orbit.set_enabled(true);
        let home = CameraPose::overview();
        self.tween = Some(CameraTween::new(
            &self.camera,
            home.position,
            home.target,
            DEFAULT_TWEEN_SECS,
        ));
    }

    fn zoom_to_region(&mut self, id: RegionId) {
        if self.mode != Mode::Overview || self.transition.is_transitioning() {
            return;
        }
        let Some(region) = self.registry.get(id) else {
            log::debug!("zoom: unknown region {}", id.0);
            return;
        };
        let anchor = region.anchor;
        self.tween = Some(CameraTween::new(
            &self.camera,
            anchor + ZOOM_OFFSET,
            anchor,
            DEFAULT_TWEEN_SECS,
        ));
    }
}
