//! Data regeneration
//!
//! For every `.bin` data file whose basename has a schema binding, two
//! compiler invocations are planned in order: first a raw-binary dump
//! to JSON (`-t … -- <bin> --raw-binary`), then a recompile of that
//! JSON back to binary (`-b`). Running both keeps the JSON and binary
//! forms of each data file in sync after a schema change.

use tracing::{debug, warn};

use forgekit_core::Result;

use crate::invoke::{Plan, ToolInvocation};
use crate::manifest::PipelineManifest;
use crate::scan::{file_name, sorted_entries};
use crate::toolchain::Toolchain;

/// Plan the dump/recompile invocation pairs for every bound data file
pub fn plan(toolchain: &Toolchain, manifest: &PipelineManifest) -> Result<Plan> {
    let compiler = toolchain.schema_compiler()?;
    let config = &manifest.data;
    let data_dir = manifest.resolve(&config.data_dir);

    let mut plan = Plan::default();

    for entry in sorted_entries(&data_dir)? {
        let Some(name) = file_name(&entry) else {
            continue;
        };
        let Some(stem) = name.strip_suffix(".bin") else {
            debug!(file = %name, "Not a data file, ignoring");
            continue;
        };

        let Some(schema_name) = config.bindings.get(stem) else {
            warn!(file = %name, "No schema binding for data file, skipping");
            plan.skip();
            continue;
        };

        let schema = data_dir.join(schema_name);
        let json = data_dir.join(format!("{stem}.json"));

        // Dump the current binary to JSON
        plan.push(
            ToolInvocation::new(&compiler)
                .arg("-t")
                .arg("-o")
                .path_arg(&data_dir)
                .path_arg(&schema)
                .arg("--")
                .path_arg(&entry)
                .arg("--raw-binary"),
        );

        // Recompile the JSON back to binary
        plan.push(
            ToolInvocation::new(&compiler)
                .arg("-b")
                .arg("-o")
                .path_arg(&data_dir)
                .path_arg(&schema)
                .path_arg(&json),
        );
    }

    Ok(plan)
}
