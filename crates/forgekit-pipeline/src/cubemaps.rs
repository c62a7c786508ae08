//! Cubemap generation
//!
//! Texture packs live as directories under an input root; a pack that
//! carries an `hdr/` subdirectory gets one generator invocation per
//! contained equirectangular HDR file. The generator takes its flags
//! in `-k=value` form, bools rendered as `true`/`false`, and writes
//! both its cubemap output and the mip chain into the pack directory.

use std::path::Path;

use tracing::debug;

use forgekit_core::Result;

use crate::invoke::{Plan, ToolInvocation};
use crate::manifest::{CubemapSettings, PipelineManifest};
use crate::scan::sorted_entries;
use crate::toolchain::Toolchain;

/// Name of the subdirectory holding equirectangular source images
const HDR_DIR: &str = "hdr";

/// Plan the generator invocations for every pack under the input root
pub fn plan(toolchain: &Toolchain, manifest: &PipelineManifest) -> Result<Plan> {
    let generator = toolchain.cubemap_generator()?;
    let config = &manifest.cubemaps;
    let input_root = manifest.resolve(&config.input_root);

    let mut plan = Plan::default();

    for pack in sorted_entries(&input_root)? {
        if !pack.is_dir() {
            continue;
        }

        let hdr_dir = pack.join(HDR_DIR);
        if !hdr_dir.is_dir() {
            debug!(pack = %pack.display(), "Pack has no hdr directory, skipping");
            plan.skip();
            continue;
        }

        for hdr_file in sorted_entries(&hdr_dir)? {
            if !hdr_file.is_file() {
                continue;
            }
            plan.push(invocation(&generator, &config.settings, &hdr_file, &pack));
        }
    }

    Ok(plan)
}

/// Assemble one generator invocation for a single HDR file.
///
/// Flag order matches what the generator documents: quiet, prefilter,
/// LUT-DFG, diffuse irradiance, input, output, samples, mip chain,
/// mip levels, mip output.
fn invocation(
    generator: &Path,
    settings: &CubemapSettings,
    input: &Path,
    pack_dir: &Path,
) -> ToolInvocation {
    ToolInvocation::new(generator)
        .arg(format!("-q={}", settings.quiet))
        .arg(format!("-p={}", settings.prefilter_roughness))
        .arg(format!("-l={}", settings.lut_dfg))
        .arg(format!("-d={}", settings.diffuse_irradiance))
        .arg(format!("-i={}", input.display()))
        .arg(format!("-o={}", pack_dir.display()))
        .arg(format!("-n={}", settings.samples))
        .arg(format!("-m={}", settings.write_mip_chain))
        .arg(format!("-c={}", settings.mip_levels))
        .arg(format!("-a={}", pack_dir.display()))
}
