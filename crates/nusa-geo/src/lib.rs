//! Geographic polygons to renderable solids: GeoJSON model, planar projection,
//! bevelled extrusion and edge outlines.
#![forbid(unsafe_code)]

pub mod edges;
pub mod extrude;
pub mod geojson;
pub mod outline;
pub mod projection;

pub use edges::{EdgeSegments, edge_segments};
pub use extrude::{ExtrudeSettings, Solid, extrude_outline};
pub use geojson::{Feature, FeatureCollection, GeoError, Geometry, PolygonRings};
pub use outline::{Outline, RingError};
pub use projection::Projection;

use nusa_geom::{Rgb, Vec3};

/// One solid produced from a feature's (sub-)polygon.
#[derive(Clone, Debug)]
pub struct FeatureSolid {
    pub solid: Solid,
    /// Index of the sub-polygon inside a MultiPolygon (0 for a Polygon).
    pub part: usize,
}

/// Result of building one feature: the solids that succeeded plus the parts
/// that were skipped because their ring was unusable.
#[derive(Clone, Debug, Default)]
pub struct FeatureBuild {
    pub solids: Vec<FeatureSolid>,
    pub skipped: Vec<(usize, RingError)>,
    /// Projected average of every outer-ring vertex, at ground height.
    pub anchor: Option<Vec3>,
}

/// Converts features into extruded solids with a fixed projection and
/// extrusion settings.
#[derive(Clone, Debug, Default)]
pub struct GeometryBuilder {
    pub projection: Projection,
    pub settings: ExtrudeSettings,
}

impl GeometryBuilder {
    pub fn new(projection: Projection, settings: ExtrudeSettings) -> Self {
        Self {
            projection,
            settings,
        }
    }

    /// Builds one solid per simple polygon and one per sub-polygon of a
    /// multi-polygon. Malformed rings are skipped and logged; they never fail
    /// the whole feature.
    pub fn build_feature(&self, feature: &Feature, color: Rgb) -> FeatureBuild {
        let mut out = FeatureBuild::default();
        let polygons: Vec<&PolygonRings> = match &feature.geometry {
            Some(Geometry::Polygon(rings)) => vec![rings],
            Some(Geometry::MultiPolygon(polys)) => polys.iter().collect(),
            Some(Geometry::Unsupported) | None => {
                log::warn!("feature has no polygon geometry; nothing to extrude");
                return out;
            }
        };
        for (part, rings) in polygons.into_iter().enumerate() {
            match self.build_polygon(rings, color) {
                Ok(solid) => out.solids.push(FeatureSolid { solid, part }),
                Err(err) => {
                    log::warn!("skipping sub-polygon {}: {}", part, err);
                    out.skipped.push((part, err));
                }
            }
        }
        out.anchor = self.anchor(feature);
        out
    }

    pub fn build_polygon(&self, rings: &PolygonRings, color: Rgb) -> Result<Solid, RingError> {
        let outer = rings.first().ok_or(RingError::Empty)?;
        let outer = Outline::from_ring(outer, &self.projection)?;
        let mut holes = Vec::new();
        for ring in rings.iter().skip(1) {
            match Outline::from_ring(ring, &self.projection) {
                Ok(hole) => holes.push(hole),
                Err(err) => log::debug!("ignoring unusable hole ring: {}", err),
            }
        }
        extrude_outline(&outer, &holes, &self.settings, color)
    }

    fn anchor(&self, feature: &Feature) -> Option<Vec3> {
        let mut sum_lon = 0.0_f64;
        let mut sum_lat = 0.0_f64;
        let mut count = 0usize;
        for rings in feature.polygons() {
            if let Some(outer) = rings.first() {
                for pos in outer {
                    if let [lon, lat, ..] = pos.as_slice() {
                        if lon.is_finite() && lat.is_finite() {
                            sum_lon += lon;
                            sum_lat += lat;
                            count += 1;
                        }
                    }
                }
            }
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(self.projection.to_world(sum_lon / n, sum_lat / n, 0.0))
    }
}
