//! Vendored tool resolution
//!
//! Tools ship with the engine tree rather than being looked up on
//! `PATH`. A [`Toolchain`] binds an engine root and a host platform and
//! turns [`ToolLocation`]s into existence-checked binary paths.

use std::path::PathBuf;

use forgekit_core::{Error, HostPlatform, Result};

use crate::manifest::{PipelineManifest, ToolLocation};

/// Resolves vendored tool binaries for one engine root and platform
#[derive(Debug, Clone)]
pub struct Toolchain {
    engine_root: PathBuf,
    platform: HostPlatform,
    tools: crate::manifest::ToolLocations,
}

impl Toolchain {
    /// Build a toolchain from a manifest for the given platform
    pub fn new(manifest: &PipelineManifest, platform: HostPlatform) -> Self {
        Self {
            engine_root: manifest.engine_root.clone(),
            platform,
            tools: manifest.tools.clone(),
        }
    }

    /// Build a toolchain for the platform of the running process
    pub fn host(manifest: &PipelineManifest) -> Self {
        Self::new(manifest, HostPlatform::current())
    }

    pub fn platform(&self) -> HostPlatform {
        self.platform
    }

    pub fn project_generator(&self) -> Result<PathBuf> {
        self.resolve(&self.tools.project_generator)
    }

    pub fn schema_compiler(&self) -> Result<PathBuf> {
        self.resolve(&self.tools.schema_compiler)
    }

    pub fn asset_converter(&self) -> Result<PathBuf> {
        self.resolve(&self.tools.asset_converter)
    }

    pub fn cubemap_generator(&self) -> Result<PathBuf> {
        self.resolve(&self.tools.cubemap_generator)
    }

    fn resolve(&self, location: &ToolLocation) -> Result<PathBuf> {
        let path = self
            .engine_root
            .join(&location.dir)
            .join(self.platform.vendored_executable(&location.name));

        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::ToolNotFound(path))
        }
    }
}
