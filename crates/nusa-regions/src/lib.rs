//! Region registry: the extruded province solids, their outlines, hover and
//! selection state, and ray picking.
#![forbid(unsafe_code)]

pub mod naming;
pub mod pick;
pub mod registry;

pub use naming::{PALETTE, display_name, palette_color};
pub use pick::PickHit;
pub use registry::{
    HOVER_EMISSIVE, Label, Material, Region, RegionId, RegionRegistry, RegionSeed, load_regions,
};
