use std::f32::consts::TAU;

use nusa_camera::CameraPose;
use nusa_geom::{Vec2, Vec3};

use crate::capture::PointerCapture;
use crate::collision::{Obstacle, collides};
use crate::config::LocomotionConfig;
use crate::input::MoveInput;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionState {
    /// Eye position without head bob.
    pub position: Vec3,
    pub yaw: f32,   // radians, 0 looks down -z
    pub pitch: f32, // radians, positive looks up
    /// Ground-plane velocity (x, z).
    pub velocity: Vec2,
    pub vertical_velocity: f32,
    pub on_ground: bool,
    pub can_jump: bool,
    pub flying: bool,
    pub running: bool,
    pub bob_phase: f32,
    pub bob_offset: f32,
}

/// Short-lived notification text.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub text: String,
    pub remaining: f32,
}

#[derive(Debug)]
pub struct FirstPersonController {
    pub config: LocomotionConfig,
    state: LocomotionState,
    capture: PointerCapture,
    obstacles: Vec<Obstacle>,
    clock: f32,
    last_jump_tap: Option<f32>,
    toast: Option<Toast>,
}

impl Default for FirstPersonController {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl FirstPersonController {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            state: spawn_state(&config),
            config,
            capture: PointerCapture::Disarmed,
            obstacles: Vec::new(),
            clock: 0.0,
            last_jump_tap: None,
            toast: None,
        }
    }

    /// Back to the spawn pose with all motion cleared.
    pub fn reset(&mut self) {
        self.state = spawn_state(&self.config);
        self.last_jump_tap = None;
        self.toast = None;
    }

    #[inline]
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Overrides the state; for scripted placement.
    pub fn set_state(&mut self, state: LocomotionState) {
        self.state = state;
    }

    pub fn set_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        log::debug!("locomotion: {} obstacles", obstacles.len());
        self.obstacles = obstacles;
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[inline]
    pub fn capture(&self) -> PointerCapture {
        self.capture
    }

    /// Enables capture requests and shows the prompt.
    pub fn arm(&mut self) {
        if self.capture == PointerCapture::Disarmed {
            self.capture = PointerCapture::Armed;
        }
    }

    /// User gesture while armed. Returns whether capture was engaged.
    pub fn engage(&mut self) -> bool {
        if self.capture == PointerCapture::Armed {
            self.capture = PointerCapture::Locked;
            true
        } else {
            false
        }
    }

    /// Pointer lock lost; the prompt shows again.
    pub fn release(&mut self) {
        if self.capture == PointerCapture::Locked {
            self.capture = PointerCapture::Armed;
        }
    }

    pub fn disarm(&mut self) {
        self.capture = PointerCapture::Disarmed;
    }

    #[inline]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.state.yaw.sin_cos();
        let (sp, cp) = self.state.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Eye position with head bob applied.
    pub fn eye_position(&self) -> Vec3 {
        self.state.position + Vec3::new(0.0, self.state.bob_offset, 0.0)
    }

    /// Writes eye position and look direction into `pose`.
    pub fn apply_to(&self, pose: &mut CameraPose) {
        let eye = self.eye_position();
        pose.position = eye;
        pose.target = eye + self.forward();
    }

    pub fn update(&mut self, dt: f32, input: &MoveInput) {
        let dt = dt.max(0.0);
        let c = self.config;
        self.clock += dt;
        if let Some(t) = self.toast.as_mut() {
            t.remaining -= dt;
            if t.remaining <= 0.0 {
                self.toast = None;
            }
        }

        self.look(dt, input);
        if input.jump_pressed {
            self.on_jump_press();
        }

        let s = &mut self.state;
        s.running = input.shift && !s.flying;
        let descending = input.shift && s.flying;
        let ascending = input.jump_held && s.flying;

        // Horizontal intent relative to where the camera faces.
        let intent = input.intent();
        let moving = intent.length() > 0.0;
        if moving {
            let intent = intent.normalized();
            let (sy, cy) = s.yaw.sin_cos();
            let fwd = Vec2::new(-sy, -cy);
            let right = Vec2::new(cy, -sy);
            let speed = if s.running { c.run_speed } else { c.walk_speed };
            let target = (fwd * intent.y + right * intent.x) * speed;
            let k = 1.0 - (-c.acceleration * dt).exp();
            s.velocity = s.velocity + (target - s.velocity) * k;
        } else {
            let friction = if s.on_ground {
                c.ground_friction
            } else {
                c.air_friction
            };
            s.velocity = s.velocity * (-friction * dt).exp();
            if s.velocity.x.abs() < c.stop_epsilon {
                s.velocity.x = 0.0;
            }
            if s.velocity.y.abs() < c.stop_epsilon {
                s.velocity.y = 0.0;
            }
        }

        let floor_y = c.standing_eye_y();
        if s.flying {
            let climb = ascending as i32 - descending as i32;
            s.position.y += c.fly_speed * dt * climb as f32;
            // Flying never lands; it only stops at eye height.
            s.position.y = s.position.y.max(floor_y);
            s.vertical_velocity = 0.0;
            s.on_ground = false;
        } else {
            s.vertical_velocity -= c.gravity * dt;
        }

        // Collision wins over the boundary clamp.
        let nx = s.position.x + s.velocity.x * dt;
        let nz = s.position.z + s.velocity.y * dt;
        let dist = (nx * nx + nz * nz).sqrt();
        if collides(&self.obstacles, nx, nz, c.player_radius) {
            s.velocity = Vec2::ZERO;
        } else if dist > c.platform_radius {
            let angle = nz.atan2(nx);
            s.position.x = angle.cos() * c.platform_radius;
            s.position.z = angle.sin() * c.platform_radius;
            s.velocity = Vec2::ZERO;
        } else {
            s.position.x = nx;
            s.position.z = nz;
        }

        if !s.flying {
            s.position.y += s.vertical_velocity * dt;
            if s.position.y <= floor_y {
                s.position.y = floor_y;
                s.vertical_velocity = 0.0;
                s.on_ground = true;
                s.can_jump = true;
            } else {
                s.on_ground = false;
                s.can_jump = false;
            }
        }

        if moving && s.on_ground {
            let speed = s.velocity.length();
            s.bob_phase = (s.bob_phase + dt * c.bob_speed * (speed / c.walk_speed)) % TAU;
        } else {
            s.bob_phase *= c.bob_damping.powf(dt * 60.0);
        }
        s.bob_offset = s.bob_phase.sin() * c.bob_amount;
    }

    fn look(&mut self, dt: f32, input: &MoveInput) {
        let c = &self.config;
        let s = &mut self.state;
        if self.capture.is_locked() {
            s.yaw -= input.pointer_delta.x * c.mouse_sensitivity;
            s.pitch -= input.pointer_delta.y * c.mouse_sensitivity;
        }
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        s.yaw += axis(input.look_left, input.look_right) * c.look_key_speed * dt;
        s.pitch += axis(input.look_up, input.look_down) * c.look_key_speed * dt;
        s.pitch = s.pitch.clamp(-c.max_pitch, c.max_pitch);
        s.yaw %= TAU;
    }

    fn on_jump_press(&mut self) {
        let double_tap = self
            .last_jump_tap
            .is_some_and(|t| self.clock - t < self.config.double_tap_window);
        self.last_jump_tap = Some(self.clock);
        let s = &mut self.state;
        if double_tap {
            s.flying = !s.flying;
            s.vertical_velocity = 0.0;
            let text = if s.flying {
                "Flying mode ON"
            } else {
                "Flying mode OFF"
            };
            log::info!("{}", text);
            self.toast = Some(Toast {
                text: text.to_string(),
                remaining: self.config.toast_secs,
            });
        }
        let s = &mut self.state;
        if !s.flying && s.can_jump && s.on_ground {
            s.vertical_velocity = self.config.jump_speed;
            s.on_ground = false;
            s.can_jump = false;
        }
    }
}

fn spawn_state(config: &LocomotionConfig) -> LocomotionState {
    let mut position = config.spawn_position;
    position.y = position.y.max(config.standing_eye_y());
    LocomotionState {
        position,
        yaw: config.spawn_yaw,
        pitch: 0.0,
        velocity: Vec2::ZERO,
        vertical_velocity: 0.0,
        on_ground: true,
        can_jump: true,
        flying: false,
        running: false,
        bob_phase: 0.0,
        bob_offset: 0.0,
    }
}
