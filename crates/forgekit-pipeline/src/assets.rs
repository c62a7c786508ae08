//! Asset conversion
//!
//! One converter invocation with an input/output directory flag pair.

use forgekit_core::{Error, Result};

use crate::invoke::{Plan, ToolInvocation};
use crate::manifest::PipelineManifest;
use crate::toolchain::Toolchain;

/// Plan the asset-converter invocation
pub fn plan(toolchain: &Toolchain, manifest: &PipelineManifest) -> Result<Plan> {
    let converter = toolchain.asset_converter()?;
    let input_dir = manifest.resolve(&manifest.assets.input_dir);
    let output_dir = manifest.resolve(&manifest.assets.output_dir);

    if !input_dir.is_dir() {
        return Err(Error::InputNotFound(input_dir));
    }

    let mut plan = Plan::default();
    plan.push(
        ToolInvocation::new(converter)
            .arg("-i")
            .path_arg(&input_dir)
            .arg("-o")
            .path_arg(&output_dir),
    );
    Ok(plan)
}
