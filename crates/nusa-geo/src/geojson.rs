//! The subset of GeoJSON the map consumes: a FeatureCollection of polygon /
//! multi-polygon features with free-form properties.
//!
//! Geometry parsing is lenient: a feature whose coordinates do not have the
//! expected nesting keeps an empty ring set (and is skipped at build time)
//! instead of failing the whole collection.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

/// `[lon, lat, (alt)]`; kept as a slice so short positions can be rejected
/// per ring rather than failing deserialization.
pub type Position = Vec<f64>;
pub type Ring = Vec<Position>;
/// Outer ring first, then holes.
pub type PolygonRings = Vec<Ring>;

/// Property keys probed for a display name, in priority order.
pub const NAME_KEYS: [&str; 5] = ["Propinsi", "NAME_1", "name", "PROV_NAME", "provinsi"];

#[derive(thiserror::Error, Debug)]
pub enum GeoError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, found {0:?}")]
    NotACollection(String),
    #[error("feature collection contains no features")]
    NoFeatures,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Polygon(PolygonRings),
    MultiPolygon(Vec<PolygonRings>),
    /// Points, lines and anything else the map does not extrude.
    Unsupported,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawFeature")]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

impl From<RawFeature> for Feature {
    fn from(raw: RawFeature) -> Self {
        Feature {
            geometry: raw.geometry.map(Geometry::from),
            properties: raw.properties.unwrap_or_default(),
        }
    }
}

impl From<RawGeometry> for Geometry {
    fn from(raw: RawGeometry) -> Self {
        match raw.kind.as_str() {
            "Polygon" => match serde_json::from_value::<PolygonRings>(raw.coordinates) {
                Ok(rings) => Geometry::Polygon(rings),
                Err(err) => {
                    log::warn!("malformed Polygon coordinates: {}", err);
                    Geometry::Polygon(Vec::new())
                }
            },
            "MultiPolygon" => match serde_json::from_value::<Vec<PolygonRings>>(raw.coordinates) {
                Ok(polys) => Geometry::MultiPolygon(polys),
                Err(err) => {
                    log::warn!("malformed MultiPolygon coordinates: {}", err);
                    Geometry::MultiPolygon(vec![Vec::new()])
                }
            },
            other => {
                log::debug!("unsupported geometry type {}", other);
                Geometry::Unsupported
            }
        }
    }
}

impl Feature {
    /// First non-empty string property among [`NAME_KEYS`].
    pub fn name_property(&self) -> Option<&str> {
        NAME_KEYS.iter().find_map(|key| {
            self.properties
                .get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
    }

    /// Every polygon ring set of the geometry, whatever its kind.
    pub fn polygons(&self) -> Vec<&PolygonRings> {
        match &self.geometry {
            Some(Geometry::Polygon(rings)) => vec![rings],
            Some(Geometry::MultiPolygon(polys)) => polys.iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl FeatureCollection {
    pub fn from_json_str(s: &str) -> Result<Self, GeoError> {
        let raw: RawCollection = serde_json::from_str(s)?;
        match raw.kind.as_deref() {
            Some("FeatureCollection") | None => {}
            Some(other) => return Err(GeoError::NotACollection(other.to_string())),
        }
        if raw.features.is_empty() {
            return Err(GeoError::NoFeatures);
        }
        Ok(FeatureCollection {
            features: raw.features,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GeoError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| GeoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let fc = Self::from_json_str(&s)?;
        log::info!("Loaded {} features from {:?}", fc.features.len(), path);
        Ok(fc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_polygon_and_multipolygon() {
        let src = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"Propinsi": "BALI"},
                 "geometry": {"type": "Polygon", "coordinates": [[[115.0,-8.0],[115.5,-8.0],[115.5,-8.5],[115.0,-8.0]]]}},
                {"type": "Feature", "properties": null,
                 "geometry": {"type": "MultiPolygon", "coordinates": [[[[1,1],[2,1],[2,2]]],[[[3,3],[4,3],[4,4]]]]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1, 2]}}
            ]
        }"#;
        let fc = FeatureCollection::from_json_str(src).expect("parse");
        assert_eq!(fc.features.len(), 3);
        assert_eq!(fc.features[0].name_property(), Some("BALI"));
        assert!(matches!(fc.features[1].geometry, Some(Geometry::MultiPolygon(ref p)) if p.len() == 2));
        assert_eq!(fc.features[1].name_property(), None);
        assert_eq!(fc.features[2].geometry, Some(Geometry::Unsupported));
    }

    #[test]
    fn malformed_coordinates_do_not_fail_collection() {
        let src = r#"{"type":"FeatureCollection","features":[
            {"properties":{"name":"x"},"geometry":{"type":"Polygon","coordinates":[1,2,3]}}
        ]}"#;
        let fc = FeatureCollection::from_json_str(src).expect("parse");
        assert_eq!(fc.features[0].geometry, Some(Geometry::Polygon(Vec::new())));
    }

    #[test]
    fn name_keys_follow_priority() {
        let src = r#"{"type":"FeatureCollection","features":[
            {"properties":{"name":"low","NAME_1":"high"},"geometry":null}
        ]}"#;
        let fc = FeatureCollection::from_json_str(src).expect("parse");
        assert_eq!(fc.features[0].name_property(), Some("high"));
    }

    #[test]
    fn rejects_non_collections_and_empty() {
        assert!(matches!(
            FeatureCollection::from_json_str(r#"{"type":"Feature","features":[]}"#),
            Err(GeoError::NotACollection(_))
        ));
        assert!(matches!(
            FeatureCollection::from_json_str(r#"{"type":"FeatureCollection","features":[]}"#),
            Err(GeoError::NoFeatures)
        ));
        assert!(matches!(
            FeatureCollection::from_json_str("not json"),
            Err(GeoError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FeatureCollection::from_path("/definitely/not/here.geojson").unwrap_err();
        assert!(matches!(err, GeoError::Io { .. }));
    }
}
