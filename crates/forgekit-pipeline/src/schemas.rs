//! Schema code generation
//!
//! Scans the schema directory (top level plus one subdirectory level,
//! matching how schema packs are laid out), looks each file up in the
//! manifest's rule table, and emits one compiler invocation per mapped
//! schema: `-c -o <output-dir> <schema> [extra flags…]`.
//!
//! Files without a rule are skipped, as are rules whose output
//! directory does not exist yet; the table describes where code *may*
//! go, not what must be present.

use std::path::Path;

use tracing::{debug, warn};

use forgekit_core::Result;

use crate::invoke::{Plan, ToolInvocation};
use crate::manifest::{PipelineManifest, SchemaConfig};
use crate::scan::{file_name, sorted_entries};
use crate::toolchain::Toolchain;

/// Plan the compiler invocations for every mapped schema file
pub fn plan(toolchain: &Toolchain, manifest: &PipelineManifest) -> Result<Plan> {
    let compiler = toolchain.schema_compiler()?;
    let config = &manifest.schemas;
    let schema_dir = manifest.resolve(&config.schema_dir);
    let code_output_dir = manifest.resolve(&config.code_output_dir);

    let mut plan = Plan::default();

    for entry in sorted_entries(&schema_dir)? {
        let Some(name) = file_name(&entry) else {
            continue;
        };

        if entry.is_dir() {
            // One level of schema pack subdirectories
            for sub_entry in sorted_entries(&entry)? {
                let Some(sub_name) = file_name(&sub_entry) else {
                    continue;
                };
                let key = format!("{name}/{sub_name}");
                plan_one(&mut plan, &compiler, config, &code_output_dir, &key, &sub_entry);
            }
        } else {
            plan_one(&mut plan, &compiler, config, &code_output_dir, &name, &entry);
        }
    }

    Ok(plan)
}

fn plan_one(
    plan: &mut Plan,
    compiler: &Path,
    config: &SchemaConfig,
    code_output_dir: &Path,
    key: &str,
    schema: &Path,
) {
    let Some(rule) = config.rules.get(key) else {
        debug!(schema = %key, "No rule for schema, skipping");
        plan.skip();
        return;
    };

    let output_dir = if rule.output_subdir.is_empty() {
        code_output_dir.to_path_buf()
    } else {
        code_output_dir.join(&rule.output_subdir)
    };

    if !output_dir.is_dir() {
        warn!(
            schema = %key,
            output = %output_dir.display(),
            "Output directory missing, skipping schema"
        );
        plan.skip();
        return;
    }

    plan.push(
        ToolInvocation::new(compiler)
            .arg("-c")
            .arg("-o")
            .path_arg(&output_dir)
            .path_arg(schema)
            .args(rule.extra_flags.iter().cloned()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::SchemaRule;
    use forgekit_core::HostPlatform;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        _dir: tempfile::TempDir,
        manifest: PipelineManifest,
        toolchain: Toolchain,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let bin_dir = root.join("vendor/flatbuffers/bin/Linux");
        fs::create_dir_all(&bin_dir).unwrap();
        fs::write(bin_dir.join("flatc"), "").unwrap();

        fs::create_dir_all(root.join("data/flatbuffer_schemas")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();

        let manifest = PipelineManifest {
            engine_root: root.to_path_buf(),
            ..Default::default()
        };
        let toolchain = Toolchain::new(&manifest, HostPlatform::Linux);

        Fixture {
            _dir: dir,
            manifest,
            toolchain,
        }
    }

    fn add_schema(f: &Fixture, rel: &str) {
        let path = f
            .manifest
            .engine_root
            .join("data/flatbuffer_schemas")
            .join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "// schema").unwrap();
    }

    #[test]
    fn test_mapped_schema_is_planned() {
        let f = fixture();
        add_schema(&f, "GridPosition.fbs");

        let plan = plan(&f.toolchain, &f.manifest).unwrap();
        assert_eq!(plan.invocations.len(), 1);

        let args = &plan.invocations[0].args;
        assert_eq!(args[0], "-c");
        assert_eq!(args[1], "-o");
        assert_eq!(args[2], f.manifest.engine_root.join("src").display().to_string());
        assert!(args[3].ends_with("GridPosition.fbs"));
    }

    #[test]
    fn test_unmapped_schema_is_skipped() {
        let f = fixture();
        add_schema(&f, "UnknownSchema.fbs");

        let plan = plan(&f.toolchain, &f.manifest).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.skipped, 1);
    }

    #[test]
    fn test_subdirectory_schema_uses_joined_key() {
        let mut f = fixture();
        add_schema(&f, "components/Velocity.fbs");
        f.manifest.schemas.rules.insert(
            "components/Velocity.fbs".to_string(),
            SchemaRule {
                output_subdir: "components".to_string(),
                extra_flags: vec!["--gen-mutable".to_string()],
            },
        );
        fs::create_dir_all(f.manifest.engine_root.join("src/components")).unwrap();

        let plan = plan(&f.toolchain, &f.manifest).unwrap();
        assert_eq!(plan.invocations.len(), 1);

        let args = &plan.invocations[0].args;
        assert_eq!(
            PathBuf::from(&args[2]),
            f.manifest.engine_root.join("src/components")
        );
        assert_eq!(args.last().unwrap(), "--gen-mutable");
    }

    #[test]
    fn test_missing_output_dir_is_skipped() {
        let mut f = fixture();
        add_schema(&f, "GridPosition.fbs");
        f.manifest
            .schemas
            .rules
            .insert(
                "GridPosition.fbs".to_string(),
                SchemaRule {
                    output_subdir: "does_not_exist".to_string(),
                    extra_flags: Vec::new(),
                },
            );

        let plan = plan(&f.toolchain, &f.manifest).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.skipped, 1);
    }

    #[test]
    fn test_plan_is_sorted_by_file_name() {
        let f = fixture();
        add_schema(&f, "GridPosition.fbs");
        add_schema(&f, "FacingComponentArrayData.fbs");

        let plan = plan(&f.toolchain, &f.manifest).unwrap();
        assert_eq!(plan.invocations.len(), 2);
        assert!(plan.invocations[0].args[3].ends_with("FacingComponentArrayData.fbs"));
        assert!(plan.invocations[1].args[3].ends_with("GridPosition.fbs"));
    }
}
