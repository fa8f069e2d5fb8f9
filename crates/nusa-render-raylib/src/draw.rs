use std::f32::consts::TAU;

use nusa_camera::CameraPose;
use nusa_geom::{Rgb, Vec3};
use nusa_regions::RegionRegistry;
use nusa_transition::{Flash, Portal, ProvinceWorld, Transform, Visual, WorldChildKind};
use raylib::prelude::*;

use crate::cache::ModelCache;
use crate::conv::{color_to_rl, color_with_alpha, shade, vec3_to_rl};
use crate::mesh::SolidModel;

const OUTLINE: Color = Color::new(0, 0, 0, 170);
const PORTAL_SEGMENTS: usize = 48;
const PORTAL_BANDS: usize = 4;

/// Region solids tinted by their material, plus crease outlines. `models`
/// is indexed by region id.
pub fn draw_regions<D: RaylibDraw3D>(
    d3: &mut D,
    registry: &RegionRegistry,
    models: &[Option<SolidModel>],
) -> usize {
    if !registry.is_visible() {
        return 0;
    }
    let mut draw_calls = 0;
    for region in registry.all() {
        let Some(Some(solid)) = models.get(region.id.index()) else {
            continue;
        };
        let tint = color_to_rl(shade(region.material.color, region.material.emissive));
        for part in &solid.parts {
            d3.draw_model(part, Vector3::zero(), 1.0, tint);
            draw_calls += 1;
        }
        for [a, b] in &region.outline.segments {
            d3.draw_line_3D(vec3_to_rl(*a), vec3_to_rl(*b), OUTLINE);
        }
    }
    draw_calls
}

fn screen_text(d: &mut RaylibDrawHandle, text: &str, x: f32, y: f32, font_size: i32, color: Color) {
    let w = d.measure_text(text, font_size);
    let x = x as i32 - w / 2;
    let y = y as i32 - font_size / 2;
    d.draw_text(text, x + 1, y + 1, font_size, Color::BLACK);
    d.draw_text(text, x, y, font_size, color);
}

/// Province names above their anchors.
pub fn draw_labels(
    d: &mut RaylibDrawHandle,
    pose: &CameraPose,
    registry: &RegionRegistry,
    width: f32,
    height: f32,
) {
    if !registry.is_visible() || !registry.labels_visible() {
        return;
    }
    for label in registry.labels() {
        if let Some(p) = pose.project(label.position, width, height) {
            screen_text(d, &label.text, p.x, p.y, 14, Color::WHITE);
        }
    }
}

fn draw_visual<D: RaylibDraw3D>(d3: &mut D, visual: &Visual, t: &Transform, models: &mut ModelCache<Model>) {
    let pos = vec3_to_rl(t.position);
    match visual {
        Visual::Model(handle) => {
            if let Some(model) = models.get_mut(*handle) {
                model.set_transform(&Matrix::rotate_xyz(vec3_to_rl(t.rotation)));
                d3.draw_model_ex(
                    &*model,
                    pos,
                    Vector3::new(0.0, 1.0, 0.0),
                    0.0,
                    Vector3::new(t.scale, t.scale, t.scale),
                    Color::WHITE,
                );
            }
        }
        Visual::Cube { color } => {
            let s = t.scale;
            d3.draw_cube(pos, s, s, s, color_to_rl(*color));
            d3.draw_cube_wires(pos, s, s, s, OUTLINE);
        }
    }
}

/// 3D part of a province world. Captions are drawn by [`draw_captions`].
pub fn draw_world<D: RaylibDraw3D>(d3: &mut D, world: &ProvinceWorld, models: &mut ModelCache<Model>) {
    for child in world.children() {
        let t = &child.transform;
        match &child.kind {
            WorldChildKind::PlatformBase {
                radius,
                thickness,
                color,
            } => {
                let base = t.position - Vec3::new(0.0, thickness * 0.5, 0.0);
                d3.draw_cylinder(vec3_to_rl(base), *radius, *radius, *thickness, 64, color_to_rl(*color));
            }
            WorldChildKind::BoundaryRing { inner, outer, color } => {
                let c = vec3_to_rl(t.position);
                let axis = Vector3::new(1.0, 0.0, 0.0);
                let steps = 4;
                for i in 0..=steps {
                    let r = inner + (outer - inner) * i as f32 / steps as f32;
                    d3.draw_circle_3D(c, r, axis, 90.0, color_with_alpha(*color, 0.8));
                }
            }
            WorldChildKind::Caption { .. } => {}
            WorldChildKind::Particles { points, .. } => {
                for p in points {
                    let at = p.offset.rotate_y(t.rotation.y) + t.position;
                    d3.draw_cube(vec3_to_rl(at), 0.1, 0.1, 0.1, color_to_rl(p.color));
                }
            }
            WorldChildKind::Floating { visual, .. } | WorldChildKind::Platform { visual, .. } => {
                draw_visual(d3, visual, t, models);
            }
        }
    }
}

/// Province name plates, facing the viewer.
pub fn draw_captions(
    d: &mut RaylibDrawHandle,
    pose: &CameraPose,
    world: &ProvinceWorld,
    width: f32,
    height: f32,
) {
    for child in world.children() {
        if let WorldChildKind::Caption { text, .. } = &child.kind {
            if let Some(p) = pose.project(child.transform.position, width, height) {
                let font_size = 32;
                let w = d.measure_text(text, font_size);
                d.draw_rectangle(
                    p.x as i32 - w / 2 - 16,
                    p.y as i32 - font_size / 2 - 8,
                    w + 32,
                    font_size + 16,
                    Color::new(15, 23, 42, 180),
                );
                screen_text(d, text, p.x, p.y, font_size, Color::WHITE);
            }
        }
    }
}

/// Swirling ring, two-sided, spinning about its normal.
pub fn draw_portal<D: RaylibDraw3D>(d3: &mut D, portal: &Portal) {
    if !portal.visible || portal.scale <= 0.0 {
        return;
    }
    let n = portal.normal;
    let reference = if n.y.abs() > 0.99 {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::UP
    };
    let u = reference.cross(n).normalized();
    let v = n.cross(u);
    let point = |r: f32, a: f32| portal.position + (u * a.cos() + v * a.sin()) * r;
    let alpha = 0.8 * portal.progress.clamp(0.0, 1.0);

    for band in 0..PORTAL_BANDS {
        let s0 = band as f32 / PORTAL_BANDS as f32;
        let s1 = (band + 1) as f32 / PORTAL_BANDS as f32;
        let r0 = (Portal::INNER_RADIUS + (Portal::OUTER_RADIUS - Portal::INNER_RADIUS) * s0) * portal.scale;
        let r1 = (Portal::INNER_RADIUS + (Portal::OUTER_RADIUS - Portal::INNER_RADIUS) * s1) * portal.scale;
        for seg in 0..PORTAL_SEGMENTS {
            let a0 = seg as f32 / PORTAL_SEGMENTS as f32 * TAU + portal.spin;
            let a1 = (seg + 1) as f32 / PORTAL_SEGMENTS as f32 * TAU + portal.spin;
            let color: Rgb = portal.swirl_color((s0 + s1) * 0.5, (a0 + a1) * 0.5);
            let c = color_with_alpha(color, alpha);
            let (p00, p01) = (vec3_to_rl(point(r0, a0)), vec3_to_rl(point(r0, a1)));
            let (p10, p11) = (vec3_to_rl(point(r1, a0)), vec3_to_rl(point(r1, a1)));
            d3.draw_triangle_3D(p00, p10, p11, c);
            d3.draw_triangle_3D(p00, p11, p01, c);
            d3.draw_triangle_3D(p00, p11, p10, c);
            d3.draw_triangle_3D(p00, p01, p11, c);
        }
    }
}

pub fn draw_flash(d: &mut RaylibDrawHandle, flash: &Flash, width: i32, height: i32) {
    if flash.is_visible() {
        d.draw_rectangle(0, 0, width, height, color_with_alpha(Rgb::WHITE, flash.opacity));
    }
}
