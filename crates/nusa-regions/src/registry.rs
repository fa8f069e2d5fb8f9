use nusa_geo::{EdgeSegments, FeatureCollection, GeometryBuilder, Solid, edge_segments};
use nusa_geom::{Ray, Rgb, Vec3};
use serde_json::{Map, Value};

use crate::naming::{display_name, palette_color};
use crate::pick::{PickHit, pick_ray};

/// Emissive applied to the hovered region.
pub const HOVER_EMISSIVE: Rgb = Rgb::from_hex(0x555555);

/// Creases sharper than this many degrees get an outline segment.
const OUTLINE_THRESHOLD_DEG: f32 = 1.0;

const LABEL_HEIGHT: f32 = 0.8;

/// Stable index of a region in registration order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(pub u32);

impl RegionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Material {
    pub color: Rgb,
    pub emissive: Rgb,
}

#[derive(Clone, Debug)]
pub struct Region {
    pub id: RegionId,
    /// Index of the source feature; several regions share it for a
    /// multi-polygon.
    pub feature_index: usize,
    pub part: usize,
    pub name: String,
    pub base_color: Rgb,
    pub solid: Solid,
    pub outline: EdgeSegments,
    pub metadata: Map<String, Value>,
    /// Ground-level point used for labels, zoom targets and the portal.
    pub anchor: Vec3,
    pub material: Material,
}

/// Everything needed to register one region.
#[derive(Clone, Debug)]
pub struct RegionSeed {
    pub feature_index: usize,
    pub part: usize,
    pub name: String,
    pub solid: Solid,
    pub metadata: Map<String, Value>,
    pub anchor: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Vec3,
}

#[derive(Debug)]
pub struct RegionRegistry {
    regions: Vec<Region>,
    labels: Vec<Label>,
    hovered: Option<RegionId>,
    selected: Option<RegionId>,
    feature_count: usize,
    visible: bool,
    labels_visible: bool,
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            labels: Vec::new(),
            hovered: None,
            selected: None,
            feature_count: 0,
            visible: true,
            labels_visible: true,
        }
    }

    /// Stores the solid together with a generated outline overlay.
    pub fn add_region(&mut self, seed: RegionSeed) -> RegionId {
        let id = RegionId(self.regions.len() as u32);
        let outline = edge_segments(&seed.solid, OUTLINE_THRESHOLD_DEG);
        let base_color = seed.solid.color;
        self.regions.push(Region {
            id,
            feature_index: seed.feature_index,
            part: seed.part,
            name: seed.name,
            base_color,
            solid: seed.solid,
            outline,
            metadata: seed.metadata,
            anchor: seed.anchor,
            material: Material {
                color: base_color,
                emissive: Rgb::BLACK,
            },
        });
        id
    }

    pub fn add_label(&mut self, text: impl Into<String>, anchor: Vec3) {
        self.labels.push(Label {
            text: text.into(),
            position: Vec3::new(anchor.x, LABEL_HEIGHT, anchor.z),
        });
    }

    /// Moves the hover highlight. The previous hovered region is restored to
    /// its base look unless it is the selected one.
    pub fn set_hovered(&mut self, id: Option<RegionId>) {
        if let Some(prev) = self.hovered {
            if Some(prev) != self.selected {
                if let Some(r) = self.regions.get_mut(prev.index()) {
                    r.material.color = r.base_color;
                    r.material.emissive = Rgb::BLACK;
                }
            }
        }
        self.hovered = id.filter(|id| id.index() < self.regions.len());
        if let Some(cur) = self.hovered {
            self.regions[cur.index()].material.emissive = HOVER_EMISSIVE;
        }
    }

    /// Records the selection; materials are left alone.
    pub fn set_selected(&mut self, id: Option<RegionId>) {
        self.selected = id.filter(|id| id.index() < self.regions.len());
    }

    #[inline]
    pub fn hovered(&self) -> Option<RegionId> {
        self.hovered
    }

    #[inline]
    pub fn selected(&self) -> Option<RegionId> {
        self.selected
    }

    #[inline]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    /// Hit-testable regions in registration order.
    #[inline]
    pub fn all(&self) -> &[Region] {
        &self.regions
    }

    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of source features that were processed.
    #[inline]
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides regions, outlines and labels together.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn labels_visible(&self) -> bool {
        self.labels_visible
    }

    pub fn toggle_labels(&mut self) -> bool {
        self.labels_visible = !self.labels_visible;
        self.labels_visible
    }

    /// Closest visible region under `ray`.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        if !self.visible {
            return None;
        }
        pick_ray(&self.regions, ray)
    }

    /// Drops every region and label.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.labels.clear();
        self.hovered = None;
        self.selected = None;
        self.feature_count = 0;
    }
}

/// Builds a registry from a feature collection: one region per extruded
/// solid, one label per feature that produced any solid. `table_name` gives
/// the content-table name for a feature index.
pub fn load_regions<'a, F>(
    collection: &FeatureCollection,
    builder: &GeometryBuilder,
    table_name: F,
) -> RegionRegistry
where
    F: Fn(usize) -> Option<&'a str>,
{
    let mut registry = RegionRegistry::new();
    for (index, feature) in collection.features.iter().enumerate() {
        let name = display_name(feature, index, table_name(index));
        let built = builder.build_feature(feature, palette_color(index));
        for skip in &built.skipped {
            log::warn!("{} (feature {}): part {} skipped: {}", name, index, skip.0, skip.1);
        }
        log::debug!("feature {}: {} -> {} solid(s)", index, name, built.solids.len());
        let Some(first) = built.solids.first() else {
            registry.feature_count += 1;
            continue;
        };
        let anchor = built.anchor.unwrap_or_else(|| {
            let c = first.solid.bounds.center();
            Vec3::new(c.x, 0.0, c.z)
        });
        registry.add_label(name.clone(), anchor);
        for fs in built.solids {
            registry.add_region(RegionSeed {
                feature_index: index,
                part: fs.part,
                name: name.clone(),
                solid: fs.solid,
                metadata: feature.properties.clone(),
                anchor,
            });
        }
        registry.feature_count += 1;
    }
    log::info!(
        "loaded {} regions from {} features",
        registry.len(),
        registry.feature_count
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use nusa_geo::{ExtrudeSettings, Outline, extrude_outline};
    use nusa_geom::Vec2;

    fn seed(x: f32, color: Rgb) -> RegionSeed {
        let o = Outline::from_points(vec![
            Vec2::new(x, 0.0),
            Vec2::new(x + 1.0, 0.0),
            Vec2::new(x + 1.0, 1.0),
            Vec2::new(x, 1.0),
        ])
        .expect("square");
        let solid = extrude_outline(&o, &[], &ExtrudeSettings::default(), color).expect("solid");
        RegionSeed {
            feature_index: 0,
            part: 0,
            name: format!("r{x}"),
            solid,
            metadata: Map::new(),
            anchor: Vec3::new(x + 0.5, 0.0, -0.5),
        }
    }

    fn registry() -> (RegionRegistry, RegionId, RegionId) {
        let mut reg = RegionRegistry::new();
        let a = reg.add_region(seed(0.0, Rgb::from_hex(0x3498db)));
        let b = reg.add_region(seed(3.0, Rgb::from_hex(0x2ecc71)));
        (reg, a, b)
    }

    #[test]
    fn hover_moves_highlight_and_restores_previous() {
        let (mut reg, a, b) = registry();
        reg.set_hovered(Some(a));
        assert_eq!(reg.get(a).map(|r| r.material.emissive), Some(HOVER_EMISSIVE));
        reg.set_hovered(Some(b));
        let ra = reg.get(a).expect("a");
        assert_eq!(ra.material.color, ra.base_color);
        assert_eq!(ra.material.emissive, Rgb::BLACK);
        assert_eq!(reg.get(b).map(|r| r.material.emissive), Some(HOVER_EMISSIVE));
        assert_eq!(reg.hovered(), Some(b));
    }

    #[test]
    fn selected_region_keeps_its_look_when_hover_moves_away() {
        let (mut reg, a, _) = registry();
        reg.set_hovered(Some(a));
        reg.set_selected(Some(a));
        reg.set_hovered(None);
        assert_eq!(reg.get(a).map(|r| r.material.emissive), Some(HOVER_EMISSIVE));
        assert_eq!(reg.selected(), Some(a));
        assert_eq!(reg.hovered(), None);
    }

    #[test]
    fn selection_does_not_touch_material() {
        let (mut reg, a, _) = registry();
        let before = reg.get(a).map(|r| r.material);
        reg.set_selected(Some(a));
        assert_eq!(reg.get(a).map(|r| r.material), before);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let (mut reg, _, _) = registry();
        reg.set_hovered(Some(RegionId(99)));
        reg.set_selected(Some(RegionId(99)));
        assert_eq!(reg.hovered(), None);
        assert_eq!(reg.selected(), None);
    }

    #[test]
    fn outline_generated_on_add() {
        let (reg, a, _) = registry();
        assert!(!reg.get(a).map(|r| r.outline.is_empty()).unwrap_or(true));
    }

    #[test]
    fn pick_finds_region_under_ray_and_respects_visibility() {
        let (mut reg, a, b) = registry();
        let down = |x: f32| Ray::new(Vec3::new(x, 10.0, -0.5), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(reg.pick(&down(0.5)).map(|h| h.region), Some(a));
        assert_eq!(reg.pick(&down(3.5)).map(|h| h.region), Some(b));
        assert_eq!(reg.pick(&down(2.0)), None);
        reg.set_visible(false);
        assert_eq!(reg.pick(&down(0.5)), None);
    }
}
