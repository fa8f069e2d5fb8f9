use nusa_geo::Solid;
use raylib::prelude::*;

use crate::conv::{aabb_to_rl, lambert};

/// GPU copy of one extruded solid, split into parts that fit raylib's
/// per-mesh vertex budget.
pub struct SolidModel {
    pub parts: Vec<Model>,
    pub bbox: raylib::core::math::BoundingBox,
}

/// Uploads a triangle soup as non-indexed meshes. Vertex colors carry baked
/// grey lighting; the region color is applied as a tint at draw time.
pub fn upload_solid(rl: &mut RaylibHandle, thread: &RaylibThread, solid: &Solid) -> Option<SolidModel> {
    let total_verts = solid.positions.len();
    if total_verts == 0 {
        return None;
    }
    let max_verts: usize = 65_001; // whole triangles
    let mut parts = Vec::new();
    let mut v_start = 0usize;
    while v_start < total_verts {
        let v_count = (total_verts - v_start).min(max_verts);
        let mut raw: raylib::ffi::Mesh = unsafe { std::mem::zeroed() };
        raw.vertexCount = v_count as i32;
        raw.triangleCount = (v_count / 3) as i32;
        unsafe {
            let vbytes = (v_count * 3 * std::mem::size_of::<f32>()) as u32;
            let cbytes = (v_count * 4 * std::mem::size_of::<u8>()) as u32;
            raw.vertices = raylib::ffi::MemAlloc(vbytes) as *mut f32;
            raw.normals = raylib::ffi::MemAlloc(vbytes) as *mut f32;
            raw.colors = raylib::ffi::MemAlloc(cbytes) as *mut u8;
            for i in 0..v_count {
                let p = solid.positions[v_start + i];
                let n = solid.normals[v_start + i];
                let dst = raw.vertices.add(i * 3);
                std::ptr::copy_nonoverlapping([p.x, p.y, p.z].as_ptr(), dst, 3);
                let dst = raw.normals.add(i * 3);
                std::ptr::copy_nonoverlapping([n.x, n.y, n.z].as_ptr(), dst, 3);
                let l = lambert(n);
                let dst = raw.colors.add(i * 4);
                std::ptr::copy_nonoverlapping([l, l, l, 255].as_ptr(), dst, 4);
            }
        }
        let mut mesh = unsafe { raylib::core::models::Mesh::from_raw(raw) };
        unsafe {
            mesh.upload(false);
        }
        match rl.load_model_from_mesh(thread, unsafe { mesh.make_weak() }) {
            Ok(model) => parts.push(model),
            Err(e) => {
                log::warn!("solid upload failed: {}", e);
                return None;
            }
        }
        v_start += v_count;
    }
    Some(SolidModel {
        parts,
        bbox: aabb_to_rl(solid.bounds),
    })
}
