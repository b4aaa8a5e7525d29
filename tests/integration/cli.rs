//! Tests for the `repogen` command line

use super::common::{write_repo, DOWNLOAD_OUTPUT, LIST_OUTPUT};
use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;
use std::path::PathBuf;

/// Isolated repository and config directory for one invocation
pub struct TestContext {
    pub temp: TempDir,
    pub repo: PathBuf,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        temp.child("config").create_dir_all().unwrap();
        let repo = temp.child("repo").to_path_buf();
        std::fs::create_dir_all(&repo).unwrap();
        write_repo(&repo);
        Self { temp, repo }
    }

    /// A Command for `repogen` run from the repository, with config
    /// directories redirected into the temp dir.
    pub fn repogen(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_repogen"));
        cmd.current_dir(&self.repo);

        let config_dir = self.temp.child("config").to_path_buf();
        if cfg!(target_os = "windows") {
            cmd.env("APPDATA", &config_dir);
            cmd.env("USERPROFILE", self.temp.path());
        } else if cfg!(target_os = "linux") {
            cmd.env("XDG_CONFIG_HOME", &config_dir);
            cmd.env("HOME", self.temp.path());
        } else {
            cmd.env("HOME", self.temp.path());
        }
        cmd.env_remove("RUST_LOG");

        cmd
    }

    #[cfg(unix)]
    pub fn fake_go(&self) -> PathBuf {
        super::common::write_fake_go(self.temp.child("bin").path(), LIST_OUTPUT, DOWNLOAD_OUTPUT)
    }
}

#[test]
fn test_help() {
    let ctx = TestContext::new();
    ctx.repogen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("manifests"));
}

#[test]
fn test_manifests_lists_nested_modules() {
    let ctx = TestContext::new();
    ctx.repogen()
        .arg("manifests")
        .assert()
        .success()
        .stdout(predicate::str::contains("go.mod"))
        .stdout(predicate::str::contains("tools/gen/go.mod"));
}

#[test]
fn test_manifests_empty_tree() {
    let ctx = TestContext::new();
    let empty = ctx.temp.child("empty");
    empty.create_dir_all().unwrap();

    ctx.repogen()
        .arg("manifests")
        .arg("--repo-root")
        .arg(empty.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No go.mod files found"));
}

#[test]
fn test_config_show_defaults() {
    let ctx = TestContext::new();
    ctx.repogen()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manifest_file_name: go.mod"))
        .stdout(predicate::str::contains("ledger_file_name: go.sum"));
}

#[test]
fn test_import_missing_go_shows_help() {
    let ctx = TestContext::new();
    ctx.repogen()
        .args(["import", "--go", "/nonexistent/bin/go"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Help:"));
}

#[test]
fn test_import_rejects_unknown_format() {
    let ctx = TestContext::new();
    ctx.repogen()
        .args(["import", "--format", "toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("toml"));
}

#[test]
fn test_import_missing_manifest() {
    let ctx = TestContext::new();
    let empty = ctx.temp.child("empty");
    empty.create_dir_all().unwrap();

    ctx.repogen()
        .args(["import", "--go", "/nonexistent/bin/go", "--repo-root"])
        .arg(empty.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Manifest not found"));
}

#[cfg(unix)]
#[test]
fn test_import_yaml() {
    let ctx = TestContext::new();
    let go = ctx.fake_go();

    ctx.repogen()
        .arg("import")
        .arg("--go")
        .arg(&go)
        .assert()
        .success()
        .stdout(predicate::str::contains("name: org_example_a"))
        .stdout(predicate::str::contains("replace: example.org/c"))
        .stderr(predicate::str::contains("2 repository declaration(s)"));
}

#[cfg(unix)]
#[test]
fn test_import_starlark() {
    let ctx = TestContext::new();
    let go = ctx.fake_go();

    let output = ctx
        .repogen()
        .arg("import")
        .arg("--go")
        .arg(&go)
        .args(["--format", "starlark"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let a = stdout.find("name = \"org_example_a\"").unwrap();
    let b = stdout.find("name = \"org_example_b\"").unwrap();
    assert!(a < b);
    assert!(stdout.contains("go_repository("));
    assert!(stdout.contains("sum = \"h1:cccc=\""));
    assert!(stdout.contains("version = \"v1.0.0\""));
}

#[cfg(unix)]
#[test]
fn test_import_json_is_stable() {
    let ctx = TestContext::new();
    let go = ctx.fake_go();

    let run = || {
        ctx.repogen()
            .arg("import")
            .arg("--go")
            .arg(&go)
            .args(["--format", "json"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let parsed: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[1]["importpath"], "example.org/b");
}

#[cfg(unix)]
#[test]
fn test_import_from_manifest_path() {
    let ctx = TestContext::new();
    let go = ctx.fake_go();

    ctx.repogen()
        .current_dir(ctx.temp.path())
        .arg("import")
        .arg("--go")
        .arg(&go)
        .arg("--manifest")
        .arg(ctx.repo.join("go.mod"))
        .assert()
        .success()
        .stdout(predicate::str::contains("org_example_b"));
}
