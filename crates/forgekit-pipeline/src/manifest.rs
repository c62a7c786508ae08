//! Pipeline manifest
//!
//! The mapping tables and paths that drive the pipeline are
//! configuration data: which schema file lands in which output
//! directory, which data file binds to which schema, where the
//! vendored tools live. Built-in defaults match the standard engine
//! layout; a JSON manifest can override any part of them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use forgekit_core::{Error, Result};

/// Where one vendored tool lives, relative to the engine root.
///
/// The final binary path is `<dir>/<platform-dir>/<name>[.exe]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLocation {
    pub dir: PathBuf,
    pub name: String,
}

impl ToolLocation {
    fn new(dir: &str, name: &str) -> Self {
        Self {
            dir: PathBuf::from(dir),
            name: name.to_string(),
        }
    }
}

/// Locations of all four external tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolLocations {
    pub project_generator: ToolLocation,
    pub schema_compiler: ToolLocation,
    pub asset_converter: ToolLocation,
    pub cubemap_generator: ToolLocation,
}

impl Default for ToolLocations {
    fn default() -> Self {
        Self {
            project_generator: ToolLocation::new("vendor/premake/bin", "premake5"),
            schema_compiler: ToolLocation::new("vendor/flatbuffers/bin", "flatc"),
            asset_converter: ToolLocation::new("vendor/assetc/bin", "assetc"),
            cubemap_generator: ToolLocation::new("tools/cubemapgen/bin", "cubemapgen"),
        }
    }
}

/// Per-schema output rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaRule {
    /// Subdirectory of the code output dir the generated code goes to.
    /// Empty means the output dir itself.
    pub output_subdir: String,
    /// Extra compiler flags, e.g. mutable-accessor generation
    pub extra_flags: Vec<String>,
}

/// Schema code generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Directory scanned for schema files (one subdirectory level deep)
    pub schema_dir: PathBuf,
    /// Root directory generated code is written under
    pub code_output_dir: PathBuf,
    /// Schema file name (or `subdir/name`) to output rule.
    /// Files without an entry are skipped.
    pub rules: BTreeMap<String, SchemaRule>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        for name in [
            "FacingComponentArrayData.fbs",
            "GridPositionComponentArrayData.fbs",
            "GridPosition.fbs",
            "InstancedGridPositionComponentArrayData.fbs",
        ] {
            rules.insert(name.to_string(), SchemaRule::default());
        }

        Self {
            schema_dir: PathBuf::from("data/flatbuffer_schemas"),
            code_output_dir: PathBuf::from("src"),
            rules,
        }
    }
}

/// Data regeneration configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding both the `.bin` data files and their schemas
    pub data_dir: PathBuf,
    /// Data file basename (without extension) to schema file name.
    /// Files without an entry are skipped.
    pub bindings: BTreeMap<String, String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        let mut bindings = BTreeMap::new();
        bindings.insert(
            "breakout_high_scores".to_string(),
            "BreakoutHighScoreSchema.fbs".to_string(),
        );
        bindings.insert(
            "breakout_powerups".to_string(),
            "BreakoutPowerupSchema.fbs".to_string(),
        );
        bindings.insert(
            "breakout_level_pack".to_string(),
            "BreakoutLevelSchema.fbs".to_string(),
        );
        bindings.insert(
            "breakout_player_save".to_string(),
            "BreakoutPlayerSettings.fbs".to_string(),
        );

        Self {
            data_dir: PathBuf::from("engine_assets/Flatbuffer_Data"),
            bindings,
        }
    }
}

/// Asset conversion configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("engine_assets/raw"),
            output_dir: PathBuf::from("engine_assets/bin"),
        }
    }
}

/// Cubemap generator flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubemapSettings {
    pub samples: u32,
    pub mip_levels: u32,
    pub prefilter_roughness: bool,
    pub lut_dfg: bool,
    pub diffuse_irradiance: bool,
    pub write_mip_chain: bool,
    pub quiet: bool,
}

impl Default for CubemapSettings {
    fn default() -> Self {
        Self {
            samples: 128,
            mip_levels: 1,
            prefilter_roughness: false,
            lut_dfg: false,
            diffuse_irradiance: true,
            write_mip_chain: true,
            quiet: false,
        }
    }
}

/// Cubemap generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubemapConfig {
    /// Root directory holding texture pack directories
    pub input_root: PathBuf,
    pub settings: CubemapSettings,
}

impl Default for CubemapConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("engine_assets/textures/packs"),
            settings: CubemapSettings::default(),
        }
    }
}

/// The whole pipeline manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineManifest {
    /// Directory every relative path in the manifest resolves against
    pub engine_root: PathBuf,
    pub tools: ToolLocations,
    pub schemas: SchemaConfig,
    pub data: DataConfig,
    pub assets: AssetConfig,
    pub cubemaps: CubemapConfig,
}

impl PipelineManifest {
    /// Load a manifest from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::invalid_manifest(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            Error::invalid_manifest(format!("cannot parse {}: {e}", path.display()))
        })
    }

    /// Resolve a manifest-relative path against the engine root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.engine_root.join(path)
        }
    }
}
