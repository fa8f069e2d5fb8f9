//! Raylib glue: conversions, solid upload, the cached model loader and the
//! draw routines for the map, the province world and the portal.
// Unsafe is required for Raylib mesh upload in this crate.

pub mod cache;
pub mod conv;
pub mod draw;
pub mod loader;
pub mod mesh;

pub use cache::ModelCache;
pub use loader::RaylibModelLoader;
pub use mesh::{SolidModel, upload_solid};
