//! Centralized geometry options with TOML preset support.
//!
//! Molecule layout, tessellation detail and curve sampling settings are
//! consolidated here. Options serialize to/from TOML so callers can keep
//! named presets on disk.

mod curve;
mod geometry;
mod molecule;

use std::path::{Path, PathBuf};

pub use curve::{CurveCover, CurveOptions};
pub use geometry::GeometryOptions;
pub use molecule::MoleculeOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MolmeshError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[molecule]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Bond lengths and multi-bond spacing.
    pub molecule: MoleculeOptions,
    /// Atom and bond tessellation detail.
    pub geometry: GeometryOptions,
    /// Spline sampling and sweep settings.
    pub curve: CurveOptions,
}

/// File extension of option presets.
pub const PRESET_EXTENSION: &str = "toml";

impl Options {
    /// Generate JSON Schema describing the exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(text: &str) -> Result<Self, MolmeshError> {
        toml::from_str(text).map_err(|e| MolmeshError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Parse errors name the file.
    pub fn load(path: &Path) -> Result<Self, MolmeshError> {
        let content = std::fs::read_to_string(path)?;
        let options = toml::from_str(&content).map_err(|e| {
            MolmeshError::OptionsParse(format!("{}: {e}", path.display()))
        })?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories.
    pub fn save(&self, path: &Path) -> Result<(), MolmeshError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolmeshError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path of preset `name` inside a preset directory.
    #[must_use]
    pub fn preset_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.{PRESET_EXTENSION}"))
    }

    /// Load preset `name` from `dir`.
    pub fn load_preset(dir: &Path, name: &str) -> Result<Self, MolmeshError> {
        Self::load(&Self::preset_path(dir, name))
    }

    /// Save these options as preset `name` in `dir`.
    pub fn save_preset(&self, dir: &Path, name: &str) -> Result<(), MolmeshError> {
        self.save(&Self::preset_path(dir, name))
    }

    /// Sorted preset names in `dir`. A missing or unreadable directory has
    /// no presets.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == PRESET_EXTENSION))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_owned))
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[molecule]
bond_length = 1.5

[curve]
cover = "top"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.molecule.bond_length, 1.5);
        assert_eq!(opts.curve.cover, CurveCover::Top);
        // Everything else should be default
        assert_eq!(opts.molecule.hydrogen_bond_scale, 0.2);
        assert_eq!(opts.geometry.atom_subdivisions, 2);
        assert_eq!(opts.curve.segments_per_span, 10);
    }

    #[test]
    fn hydrogen_bonds_are_shortened() {
        let opts = MoleculeOptions::default();
        assert!((opts.bond_length_to("H") - 0.2).abs() < 1e-6);
        assert_eq!(opts.bond_length_to("C"), 1.0);
        let geo = GeometryOptions::default();
        assert_eq!(geo.radius_for("H"), 0.05);
        assert_eq!(geo.radius_for("O"), 0.15);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = std::env::temp_dir().join("molmesh-options-test");
        let path = dir.join("broken.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[molecule\nbond_length = ").unwrap();
        let err = Options::load(&path).unwrap_err();
        match err {
            MolmeshError::OptionsParse(msg) => {
                assert!(msg.contains("broken.toml"), "message lacks file: {msg}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(matches!(
            Options::load(&dir.join("missing.toml")),
            Err(MolmeshError::Io(_))
        ));
    }

    #[test]
    fn save_then_load_and_list_presets() {
        let dir = std::env::temp_dir().join("molmesh-presets-test");
        let mut opts = Options::default();
        opts.geometry.bond_segments = 16;
        opts.save_preset(&dir, "detailed").unwrap();
        assert_eq!(
            Options::preset_path(&dir, "detailed"),
            dir.join("detailed.toml")
        );
        let loaded = Options::load_preset(&dir, "detailed").unwrap();
        assert_eq!(loaded, opts);
        std::fs::write(dir.join("notes.txt"), "not a preset").unwrap();
        let names = Options::list_presets(&dir);
        assert!(names.contains(&"detailed".to_owned()));
        assert!(!names.contains(&"notes".to_owned()));
        assert!(Options::list_presets(&dir.join("absent")).is_empty());
    }

    #[test]
    fn toml_text_parses_with_defaults() {
        let opts = Options::from_toml("[geometry]\natom_radius = 0.3\n").unwrap();
        assert_eq!(opts.geometry.atom_radius, 0.3);
        assert_eq!(opts.molecule, MoleculeOptions::default());
        assert!(matches!(
            Options::from_toml("geometry = 3"),
            Err(MolmeshError::OptionsParse(_))
        ));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("molecule"));
        assert!(props.contains_key("geometry"));
        assert!(props.contains_key("curve"));

        let molecule = &props["molecule"]["properties"];
        assert!(molecule.get("bond_length").is_some());
        assert!(molecule.get("ring_initial_angle").is_none());
        let curve = &props["curve"]["properties"];
        assert!(curve.get("frame_epsilon").is_none());
    }
}
