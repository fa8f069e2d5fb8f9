use nusa_geom::Rgb;
use nusa_render_raylib::conv::{camera_to_rl, color_to_rl};
use nusa_render_raylib::draw::{
    draw_captions, draw_flash, draw_labels, draw_portal, draw_regions, draw_world,
};
use nusa_scene::Mode;
use raylib::prelude::*;

use super::App;

const OVERVIEW_SKY: Rgb = Rgb::from_hex(0x0b1020);
const PANEL: Color = Color::new(15, 23, 42, 200);

impl App {
    pub fn render(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let width = rl.get_screen_width();
        let height = rl.get_screen_height();
        let (w, h) = (width as f32, height as f32);
        let camera3d = camera_to_rl(&self.scene.camera);
        let sky = self.scene.background().unwrap_or(OVERVIEW_SKY);

        let mut d = rl.begin_drawing(thread);
        d.clear_background(color_to_rl(sky));
        {
            let mut d3 = d.begin_mode3D(camera3d);
            self.debug_stats.draw_calls = draw_regions(&mut d3, self.scene.registry(), &self.solids);
            if let Some(world) = self.scene.transition().world() {
                draw_world(&mut d3, world, &mut self.models);
            }
            draw_portal(&mut d3, self.scene.transition().portal());
        }

        draw_labels(&mut d, &self.scene.camera, self.scene.registry(), w, h);
        if let Some(world) = self.scene.transition().world() {
            draw_captions(&mut d, &self.scene.camera, world, w, h);
        }
        self.draw_hud(&mut d, width, height);
        draw_flash(&mut d, self.scene.transition().flash(), width, height);
    }

    fn draw_hud(&self, d: &mut RaylibDrawHandle, width: i32, height: i32) {
        let stats = self.scene.hud_stats();
        if stats.transitioning {
            return;
        }

        let mut lines = vec![
            format!("Provinces: {}", stats.province_count),
            format!("Solids: {}", stats.solid_count),
            format!(
                "Selected: {}",
                stats.selected.as_deref().unwrap_or("-")
            ),
            format!("Distance: {:.1}", stats.camera_distance),
        ];
        if let Some(track) = &stats.now_playing {
            let muted = if self.scene.music().is_muted() { " (muted)" } else { "" };
            lines.push(format!("Music: {}{}", track, muted));
        }
        d.draw_rectangle(8, 8, 260, 22 * lines.len() as i32 + 12, PANEL);
        for (i, line) in lines.iter().enumerate() {
            d.draw_text(line, 16, 16 + 22 * i as i32, 18, Color::WHITE);
        }
        d.draw_fps(width - 90, 12);

        let help = match stats.mode {
            Mode::Overview => "Click a province to enter | drag to orbit | wheel to zoom | Z zoom | L labels | R reset | M mute",
            Mode::FirstPerson => "WASD move | Shift run | Space jump (double tap: fly) | arrows look | Esc leave | M mute",
        };
        let hw = d.measure_text(help, 16);
        d.draw_text(help, (width - hw) / 2, height - 28, 16, Color::LIGHTGRAY);

        if stats.capture_prompt {
            let text = "Click to look around";
            let tw = d.measure_text(text, 24);
            d.draw_rectangle((width - tw) / 2 - 12, height / 2 - 20, tw + 24, 40, PANEL);
            d.draw_text(text, (width - tw) / 2, height / 2 - 12, 24, Color::WHITE);
        }
        if let Some(toast) = &stats.toast {
            let tw = d.measure_text(toast, 22);
            d.draw_rectangle((width - tw) / 2 - 10, 60, tw + 20, 34, PANEL);
            d.draw_text(toast, (width - tw) / 2, 66, 22, Color::GOLD);
        }
        if let Some(banner) = self.scene.banner() {
            let tw = d.measure_text(&banner.title, 40);
            let sw = d.measure_text(&banner.subtitle, 18);
            let bw = tw.max(sw) + 48;
            let top = height / 3 - 40;
            d.draw_rectangle((width - bw) / 2, top, bw, 100, PANEL);
            d.draw_text(&banner.title, (width - tw) / 2, top + 14, 40, Color::WHITE);
            d.draw_text(&banner.subtitle, (width - sw) / 2, top + 66, 18, Color::LIGHTGRAY);
        }
    }
}

/// Shown when the province map could not be loaded.
pub fn draw_load_error(rl: &mut RaylibHandle, thread: &RaylibThread, message: &str) {
    let width = rl.get_screen_width();
    let height = rl.get_screen_height();
    let mut d = rl.begin_drawing(thread);
    d.clear_background(color_to_rl(OVERVIEW_SKY));
    let title = "Could not load the province map";
    let tw = d.measure_text(title, 30);
    d.draw_text(title, (width - tw) / 2, height / 2 - 60, 30, Color::RED);
    let mw = d.measure_text(message, 18);
    d.draw_text(message, (width - mw) / 2, height / 2 - 10, 18, Color::WHITE);
    let hint = "Press R to retry";
    let hw = d.measure_text(hint, 20);
    d.draw_text(hint, (width - hw) / 2, height / 2 + 30, 20, Color::LIGHTGRAY);
}
