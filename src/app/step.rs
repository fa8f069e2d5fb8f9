use nusa_geom::Vec2;
use nusa_locomotion::MoveInput;
use nusa_render_raylib::RaylibModelLoader;
use nusa_scene::{Event, Mode, Soundtrack};
use raylib::prelude::*;

use super::App;

/// Pointer travel (pixels) beyond which a press counts as a drag.
const CLICK_SLOP: f32 = 4.0;

impl App {
    pub fn step(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, audio: &mut dyn Soundtrack, dt: f32) {
        self.process_content_file_events();
        let input = self.poll_input(rl);

        let mut loader = RaylibModelLoader {
            rl: &mut *rl,
            thread,
            cache: &mut self.models,
            root: &self.paths.media,
        };
        self.scene.update(dt, &input, &mut loader, audio);
        self.debug_stats.models_cached = self.models.len();

        let locked = self.scene.capture().is_locked();
        if locked && !self.cursor_hidden {
            rl.disable_cursor();
            self.cursor_hidden = true;
        } else if !locked && self.cursor_hidden {
            rl.enable_cursor();
            self.cursor_hidden = false;
        }
    }

    /// Maps devices to scene events and this frame's movement input.
    fn poll_input(&mut self, rl: &RaylibHandle) -> MoveInput {
        let w = rl.get_screen_width() as f32;
        let h = rl.get_screen_height() as f32;
        let mouse = rl.get_mouse_position();
        let delta = rl.get_mouse_delta();
        let moved = delta.x != 0.0 || delta.y != 0.0;
        let mode = self.scene.mode();

        if rl.is_key_pressed(KeyboardKey::KEY_L) {
            self.scene.emit(Event::LabelsToggled);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_M) {
            self.scene.emit(Event::MuteToggled);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            self.scene.emit(Event::ResetViewRequested);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            if self.scene.capture().is_locked() {
                self.scene.emit(Event::CaptureReleased);
            } else if mode == Mode::FirstPerson {
                self.scene.emit(Event::ExitRequested);
            }
        }

        match mode {
            Mode::Overview => {
                if moved {
                    let ray = self.scene.camera.pixel_ray(mouse.x, mouse.y, w, h);
                    self.scene.emit(Event::PointerMoved { ray });
                }
                if rl.is_key_pressed(KeyboardKey::KEY_Z) {
                    if let Some(id) = self.scene.registry().hovered() {
                        self.scene.emit(Event::ZoomToRegion { id });
                    }
                }
                let wheel = rl.get_mouse_wheel_move();
                if wheel != 0.0 {
                    self.scene.emit(Event::Wheel { delta: wheel });
                }
                if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
                    self.pointer.pressed_at = Some(mouse);
                    self.pointer.dragged = false;
                }
                if let Some(start) = self.pointer.pressed_at {
                    let (dx, dy) = (mouse.x - start.x, mouse.y - start.y);
                    if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
                        self.pointer.dragged = true;
                    }
                    if self.pointer.dragged && moved {
                        self.scene.emit(Event::OrbitDragged {
                            dx: delta.x,
                            dy: delta.y,
                            viewport_height: h,
                        });
                    }
                }
                if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
                    if self.pointer.pressed_at.take().is_some() && !self.pointer.dragged {
                        self.scene.emit(Event::Clicked);
                    }
                    self.pointer.dragged = false;
                }
                MoveInput::default()
            }
            Mode::FirstPerson => {
                self.pointer = Default::default();
                if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
                    self.scene.emit(Event::Clicked);
                }
                let key = |k| rl.is_key_down(k);
                MoveInput {
                    forward: key(KeyboardKey::KEY_W),
                    backward: key(KeyboardKey::KEY_S),
                    left: key(KeyboardKey::KEY_A),
                    right: key(KeyboardKey::KEY_D),
                    shift: key(KeyboardKey::KEY_LEFT_SHIFT) || key(KeyboardKey::KEY_RIGHT_SHIFT),
                    jump_pressed: rl.is_key_pressed(KeyboardKey::KEY_SPACE),
                    jump_held: key(KeyboardKey::KEY_SPACE),
                    look_left: key(KeyboardKey::KEY_LEFT),
                    look_right: key(KeyboardKey::KEY_RIGHT),
                    look_up: key(KeyboardKey::KEY_UP),
                    look_down: key(KeyboardKey::KEY_DOWN),
                    pointer_delta: Vec2::new(delta.x, delta.y),
                }
            }
        }
    }
}
