//! Mesh generation configuration.
//!
//! `MeshConfig` is constructed once (from defaults or a TOML file) and passed
//! by shared reference through every pipeline stage; nothing mutates it after
//! construction. On disk the record lives under a `[main]` table whose keys
//! match the field names exactly:
//!
//! ```toml
//! [main]
//! refinement_levels = 4
//! order = 3
//! include_external_domain = false
//! r_core = 1.5
//! r_star = 5.0
//! flattening = 0.0
//! r_infinity = 6.0
//! r_instability = 1e-14
//! core_steepness = 1.0
//! ```
//!
//! Unspecified keys fall back to the defaults defined here. Radii are not
//! cross-validated (`r_core < r_star < r_infinity` is the caller's contract);
//! inconsistent values show up as flipped elements downstream, not as errors
//! here.

use crate::mesh_error::StellarMeshError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration parameters for stellar mesh generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Number of uniform refinement passes applied after topology creation.
    #[serde(default = "default_refinement_levels")]
    pub refinement_levels: u32,
    /// Polynomial order of the high-order nodal representation.
    #[serde(default = "default_order")]
    pub order: u32,
    /// Whether to include an external domain extending to `r_infinity`.
    /// Currently a no-op, kept as a forward-compatible hook.
    #[serde(default)]
    pub include_external_domain: bool,
    /// Radius of the stellar core region.
    #[serde(default = "default_r_core")]
    pub r_core: f64,
    /// Radius of the stellar surface.
    #[serde(default = "default_r_star")]
    pub r_star: f64,
    /// Flattening factor for spheroidal shaping (0 = sphere, >0 = oblate).
    #[serde(default)]
    pub flattening: f64,
    /// Logical outer radius of the external domain.
    #[serde(default = "default_r_infinity")]
    pub r_infinity: f64,
    /// Radius inside which transforms are skipped to avoid the singular
    /// cube center.
    #[serde(default = "default_r_instability")]
    pub r_instability: f64,
    /// Steepness of the core-to-envelope blend.
    #[serde(default = "default_core_steepness")]
    pub core_steepness: f64,
}

fn default_refinement_levels() -> u32 {
    4
}

fn default_order() -> u32 {
    3
}

fn default_r_core() -> f64 {
    1.5
}

fn default_r_star() -> f64 {
    5.0
}

fn default_r_infinity() -> f64 {
    6.0
}

fn default_r_instability() -> f64 {
    1e-14
}

fn default_core_steepness() -> f64 {
    1.0
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            refinement_levels: default_refinement_levels(),
            order: default_order(),
            include_external_domain: false,
            r_core: default_r_core(),
            r_star: default_r_star(),
            flattening: 0.0,
            r_infinity: default_r_infinity(),
            r_instability: default_r_instability(),
            core_steepness: default_core_steepness(),
        }
    }
}

/// On-disk layout: the config record under a `[main]` table.
#[derive(Serialize, Deserialize)]
struct ConfigFile {
    main: MeshConfig,
}

impl MeshConfig {
    /// Load a configuration from a TOML file with a `[main]` table.
    ///
    /// Missing keys are filled from the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StellarMeshError> {
        let text = std::fs::read_to_string(path)?;
        let file: ConfigFile =
            toml::from_str(&text).map_err(|e| StellarMeshError::ConfigParse(e.to_string()))?;
        Ok(file.main)
    }

    /// Write this configuration to a TOML file under a `[main]` table.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StellarMeshError> {
        let file = ConfigFile { main: self.clone() };
        let text = toml::to_string_pretty(&file)
            .map_err(|e| StellarMeshError::ConfigSerialize(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = MeshConfig::default();
        assert_eq!(cfg.refinement_levels, 4);
        assert_eq!(cfg.order, 3);
        assert!(!cfg.include_external_domain);
        assert_eq!(cfg.r_core, 1.5);
        assert_eq!(cfg.r_star, 5.0);
        assert_eq!(cfg.flattening, 0.0);
        assert_eq!(cfg.r_infinity, 6.0);
        assert_eq!(cfg.r_instability, 1e-14);
        assert_eq!(cfg.core_steepness, 1.0);
    }

    #[test]
    fn partial_table_fills_from_defaults() {
        let cfg: MeshConfig = toml::from_str::<super::ConfigFile>(
            "[main]\nflattening = 0.2\nrefinement_levels = 1\n",
        )
        .unwrap()
        .main;
        assert_eq!(cfg.flattening, 0.2);
        assert_eq!(cfg.refinement_levels, 1);
        assert_eq!(cfg.order, 3);
        assert_eq!(cfg.r_star, 5.0);
    }

    #[test]
    fn save_load_round_trip() {
        let path = std::env::temp_dir().join("stellar_mesh_config_roundtrip.toml");
        let cfg = MeshConfig {
            flattening: 0.1,
            refinement_levels: 2,
            ..MeshConfig::default()
        };
        cfg.save(&path).unwrap();
        let loaded = MeshConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
        let _ = std::fs::remove_file(&path);
    }
}
