//! Per-province content: display names, music tracks and model catalogs,
//! loaded from TOML. Anything not configured falls back to a generic set.
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use nusa_geom::Vec3;
use serde::Deserialize;

/// A decorative model drawn at random for the floating rings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModelSpec {
    pub path: String,
    #[serde(default)]
    pub scale: Option<f32>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A model placed at a fixed spot on the platform.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PlacedModel {
    pub path: String,
    #[serde(default)]
    pub scale: Option<f32>,
    #[serde(default)]
    pub position: Vec3,
    /// Euler angles in radians.
    #[serde(default)]
    pub rotation: Vec3,
    /// Turn rate about y in radians per second; most placements are static.
    #[serde(default)]
    pub spin: f32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProvinceContent {
    pub index: usize,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub music: Option<String>,
    #[serde(default)]
    pub floating: Vec<ModelSpec>,
    #[serde(default)]
    pub platform: Vec<PlacedModel>,
}

#[derive(Deserialize)]
struct ContentConfig {
    #[serde(default)]
    fallback_music: Option<String>,
    #[serde(default)]
    fallback_models: Option<Vec<String>>,
    #[serde(default)]
    provinces: Vec<ProvinceContent>,
}

pub const DEFAULT_FALLBACK_MUSIC: &str = "music/default.mp3";
pub const DEFAULT_FALLBACK_MODELS: [&str; 3] = [
    "models/default/cube.glb",
    "models/default/sphere.glb",
    "models/default/cylinder.glb",
];

#[derive(Clone, Debug, PartialEq)]
pub struct ContentTables {
    pub fallback_music: String,
    pub fallback_models: Vec<ModelSpec>,
    pub provinces: HashMap<usize, ProvinceContent>,
}

impl Default for ContentTables {
    fn default() -> Self {
        Self {
            fallback_music: DEFAULT_FALLBACK_MUSIC.to_string(),
            fallback_models: DEFAULT_FALLBACK_MODELS
                .iter()
                .map(|p| ModelSpec {
                    path: (*p).to_string(),
                    scale: None,
                    name: None,
                })
                .collect(),
            provinces: HashMap::new(),
        }
    }
}

impl ContentTables {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: ContentConfig = toml::from_str(toml_str)?;
        let mut tables = ContentTables::default();
        if let Some(music) = cfg.fallback_music {
            tables.fallback_music = music;
        }
        if let Some(models) = cfg.fallback_models {
            if models.is_empty() {
                return Err("fallback_models must not be empty".into());
            }
            tables.fallback_models = models
                .into_iter()
                .map(|path| ModelSpec {
                    path,
                    scale: None,
                    name: None,
                })
                .collect();
        }
        for p in cfg.provinces {
            if tables.provinces.contains_key(&p.index) {
                log::warn!("content: province {} listed twice; keeping the last entry", p.index);
            }
            tables.provinces.insert(p.index, p);
        }
        Ok(tables)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path.as_ref())?;
        let tables = Self::from_toml_str(&s)?;
        log::info!(
            "content: {} province entries from {}",
            tables.provinces.len(),
            path.as_ref().display()
        );
        Ok(tables)
    }

    #[inline]
    pub fn province(&self, index: usize) -> Option<&ProvinceContent> {
        self.provinces.get(&index)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.province(index)?.name.as_deref()
    }

    /// Configured track or the fallback track.
    pub fn music_for(&self, index: usize) -> &str {
        self.province(index)
            .and_then(|p| p.music.as_deref())
            .unwrap_or(self.fallback_music.as_str())
    }

    /// Candidates for the floating rings; the fallback set when the province
    /// has none configured.
    pub fn floating_models(&self, index: usize) -> &[ModelSpec] {
        match self.province(index) {
            Some(p) if !p.floating.is_empty() => &p.floating,
            _ => &self.fallback_models,
        }
    }

    /// Platform placements; empty when none are configured.
    pub fn platform_models(&self, index: usize) -> &[PlacedModel] {
        self.province(index).map_or(&[][..], |p| p.platform.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
fallback_music = "music/other.mp3"

[[provinces]]
index = 19
name = "Jawa Timur"
music = "music/jatim.mp3"

[[provinces.floating]]
path = "models/jatim/keris.glb"
scale = 0.8
name = "Keris"

[[provinces.platform]]
path = "models/jatim/tugu.glb"
scale = 7.0
position = { x = 0.0, y = 0.1, z = -6.0 }
name = "Tugu Pahlawan"

[[provinces]]
index = 0
name = "Aceh"
"#;

    #[test]
    fn parses_tables() {
        let t = ContentTables::from_toml_str(SAMPLE).expect("parse");
        assert_eq!(t.name(19), Some("Jawa Timur"));
        assert_eq!(t.music_for(19), "music/jatim.mp3");
        assert_eq!(t.floating_models(19).len(), 1);
        let placed = &t.platform_models(19)[0];
        assert_eq!(placed.scale, Some(7.0));
        assert_eq!(placed.position, Vec3::new(0.0, 0.1, -6.0));
        assert_eq!(placed.rotation, Vec3::ZERO);
    }

    #[test]
    fn missing_entries_fall_back() {
        let t = ContentTables::from_toml_str(SAMPLE).expect("parse");
        assert_eq!(t.music_for(0), "music/other.mp3");
        assert_eq!(t.music_for(33), "music/other.mp3");
        assert_eq!(t.floating_models(0).len(), DEFAULT_FALLBACK_MODELS.len());
        assert!(t.platform_models(5).is_empty());
        assert_eq!(t.name(5), None);
    }

    #[test]
    fn empty_fallback_set_is_rejected() {
        assert!(ContentTables::from_toml_str("fallback_models = []").is_err());
        assert!(ContentTables::from_toml_str("provinces = 3").is_err());
    }

    #[test]
    fn bundled_content_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/content.toml");
        let t = ContentTables::from_path(path).expect("bundled content");
        assert_eq!(t.provinces.len(), 34);
        assert_eq!(t.name(19), Some("Jawa Timur"));
        assert_eq!(t.platform_models(19).len(), 4);
        assert_eq!(t.floating_models(19).len(), 3);
    }

    proptest::proptest! {
        #[test]
        fn every_index_resolves_to_something(index in 0usize..200) {
            let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/content.toml");
            let t = ContentTables::from_path(path).expect("bundled content");
            proptest::prop_assert!(!t.music_for(index).is_empty());
            proptest::prop_assert!(!t.floating_models(index).is_empty());
            if index >= 34 {
                proptest::prop_assert_eq!(t.music_for(index), t.fallback_music.as_str());
                proptest::prop_assert!(t.platform_models(index).is_empty());
            }
        }
    }
}
