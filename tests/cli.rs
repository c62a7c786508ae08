//! End-to-end CLI tests against a scratch engine tree

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

struct TestTree {
    _tmp: TempDir,
    root: PathBuf,
}

impl TestTree {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();

        for (dir, name) in [
            ("vendor/premake/bin", "premake5"),
            ("vendor/flatbuffers/bin", "flatc"),
            ("vendor/assetc/bin", "assetc"),
            ("tools/cubemapgen/bin", "cubemapgen"),
        ] {
            let bin_dir = root.join(dir).join("Linux");
            fs::create_dir_all(&bin_dir).expect("create tool dir");
            write_stub_tool(&bin_dir.join(name));
        }

        fs::create_dir_all(root.join("data/flatbuffer_schemas")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("engine_assets/Flatbuffer_Data")).unwrap();
        fs::create_dir_all(root.join("engine_assets/raw")).unwrap();
        fs::create_dir_all(root.join("engine_assets/textures/packs")).unwrap();

        Self { _tmp: tmp, root }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("forgekit").expect("binary builds");
        cmd.arg("--root")
            .arg(&self.root)
            .arg("--platform")
            .arg("linux");
        cmd
    }

    fn write(&self, rel: &str, contents: &str) {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

#[cfg(unix)]
fn write_stub_tool(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::write(path, "#!/bin/sh\nexit 0\n").expect("write stub tool");
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn write_stub_tool(path: &Path) {
    fs::write(path, "").expect("write stub tool");
}

#[test]
fn projects_dry_run_prints_platform_action() {
    let tree = TestTree::new();
    tree.cmd()
        .args(["--dry-run", "projects"])
        .assert()
        .success()
        .stdout(contains("gmake2"))
        .stdout(contains("premake5"));
}

#[test]
fn projects_action_override() {
    let tree = TestTree::new();
    tree.cmd()
        .args(["--dry-run", "projects", "--action", "vs2022"])
        .assert()
        .success()
        .stdout(contains("vs2022"));
}

#[test]
fn schemas_json_plan() {
    let tree = TestTree::new();
    tree.write("data/flatbuffer_schemas/GridPosition.fbs", "// schema");
    tree.write("data/flatbuffer_schemas/Orphan.fbs", "// schema");

    tree.cmd()
        .args(["--format", "json", "schemas"])
        .assert()
        .success()
        .stdout(contains("GridPosition.fbs"))
        .stdout(contains("\"skipped\": 1"));
}

#[test]
fn data_dry_run_shows_raw_binary_dump() {
    let tree = TestTree::new();
    tree.write("engine_assets/Flatbuffer_Data/breakout_powerups.bin", "");

    tree.cmd()
        .args(["--dry-run", "data"])
        .assert()
        .success()
        .stdout(contains("--raw-binary"))
        .stdout(contains("BreakoutPowerupSchema.fbs"));
}

#[test]
fn assets_dry_run_shows_flag_pair() {
    let tree = TestTree::new();
    tree.cmd()
        .args(["--dry-run", "assets"])
        .assert()
        .success()
        .stdout(contains("assetc"))
        .stdout(contains("-i"))
        .stdout(contains("-o"));
}

#[test]
fn cubemaps_flags_follow_cli_overrides() {
    let tree = TestTree::new();
    tree.write("engine_assets/textures/packs/sky/hdr/noon.hdr", "");

    tree.cmd()
        .args(["--dry-run", "cubemaps", "-n", "64", "-m", "4", "--quiet"])
        .assert()
        .success()
        .stdout(contains("-n=64"))
        .stdout(contains("-c=4"))
        .stdout(contains("-q=true"));
}

#[test]
fn missing_tool_is_reported() {
    let tree = TestTree::new();
    fs::remove_file(tree.root.join("vendor/premake/bin/Linux/premake5")).unwrap();

    tree.cmd()
        .args(["--dry-run", "projects"])
        .assert()
        .failure()
        .stderr(contains("Tool not found"));
}

#[test]
fn invalid_manifest_is_reported() {
    let tree = TestTree::new();
    tree.write("manifest.json", "{ not json");

    tree.cmd()
        .arg("--manifest")
        .arg(tree.root.join("manifest.json"))
        .args(["--dry-run", "projects"])
        .assert()
        .failure()
        .stderr(contains("manifest"));
}

#[test]
fn manifest_overrides_schema_table() {
    let tree = TestTree::new();
    tree.write("data/flatbuffer_schemas/Custom.fbs", "// schema");
    let manifest = format!(
        r#"{{
            "engine_root": {root:?},
            "schemas": {{
                "rules": {{ "Custom.fbs": {{ "extra_flags": ["--gen-mutable"] }} }}
            }}
        }}"#,
        root = tree.root.display().to_string()
    );
    tree.write("manifest.json", &manifest);

    let mut cmd = Command::cargo_bin("forgekit").expect("binary builds");
    cmd.arg("--manifest")
        .arg(tree.root.join("manifest.json"))
        .args(["--platform", "linux", "--dry-run", "schemas"])
        .assert()
        .success()
        .stdout(contains("Custom.fbs"))
        .stdout(contains("--gen-mutable"));
}

#[cfg(unix)]
#[test]
fn schemas_execute_runs_stub_compiler() {
    let tree = TestTree::new();
    tree.write("data/flatbuffer_schemas/GridPosition.fbs", "// schema");

    tree.cmd()
        .arg("schemas")
        .assert()
        .success()
        .stdout(contains("Done: ran 1"));
}

#[cfg(unix)]
#[test]
fn failing_tool_fails_the_run() {
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new();
    tree.write("data/flatbuffer_schemas/GridPosition.fbs", "// schema");

    let flatc = tree.root.join("vendor/flatbuffers/bin/Linux/flatc");
    fs::write(&flatc, "#!/bin/sh\nexit 1\n").unwrap();
    let mut perms = fs::metadata(&flatc).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&flatc, perms).unwrap();

    tree.cmd()
        .arg("schemas")
        .assert()
        .failure()
        .stderr(contains("invocations failed"));
}
