//! Tests that run the importer against a real subprocess standing in for `go`

#![cfg(unix)]

use super::common::{
    fake_go_calls, snapshot_tree, write_fake_go, write_repo, DOWNLOAD_OUTPUT, LIST_OUTPUT,
};
use repogen::di::mocks::MockConfigProvider;
use repogen::toolchain::GoToolchain;
use repogen::{ImportRequest, ImportResult, RepoError, RepoImporter};
use serial_test::serial;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn import_with(go: &Path, root: &Path) -> Result<ImportResult, RepoError> {
    RepoImporter::with_dependencies(
        Arc::new(MockConfigProvider::default()),
        Arc::new(GoToolchain::new(go)),
    )
    .import_repos(&ImportRequest::new(root.join("go.mod"), root))
}

#[test]
#[serial]
fn test_import_with_subprocess() {
    let repo = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    write_repo(repo.path());
    let go = write_fake_go(bin.path(), LIST_OUTPUT, DOWNLOAD_OUTPUT);

    let result = import_with(&go, repo.path()).unwrap();

    let names: Vec<&str> = result.declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["org_example_a", "org_example_b"]);
    assert_eq!(result.declarations[1].sum, "h1:cccc=");
    assert_eq!(result.declarations[1].replace.as_deref(), Some("example.org/c"));

    let calls = fake_go_calls(bin.path());
    assert_eq!(calls.len(), 2, "calls: {:?}", calls);
    assert!(calls[0].ends_with("|list -m -json all"));
    assert!(calls[1].ends_with("|mod download -json example.org/c@v1.0.0"));

    // Both ran in the same snapshot directory, outside the repository.
    let dirs: Vec<&str> = calls.iter().filter_map(|c| c.split('|').next()).collect();
    assert_eq!(dirs[0], dirs[1]);
    assert!(!Path::new(dirs[0]).starts_with(repo.path()));
    assert!(!Path::new(dirs[0]).exists());
}

#[test]
#[serial]
fn test_subprocess_rewrites_do_not_leak() {
    let repo = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    write_repo(repo.path());
    let before = snapshot_tree(repo.path());
    let go = write_fake_go(bin.path(), LIST_OUTPUT, DOWNLOAD_OUTPUT);

    import_with(&go, repo.path()).unwrap();

    assert_eq!(snapshot_tree(repo.path()), before);
}

#[test]
#[serial]
fn test_no_download_when_ledger_complete() {
    let repo = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    write_repo(repo.path());
    fs::write(
        repo.path().join("go.sum"),
        "example.org/a v1.2.0 h1:aaaa=\nexample.org/c v1.0.0 h1:cccc=\n",
    )
    .unwrap();
    let go = write_fake_go(bin.path(), LIST_OUTPUT, DOWNLOAD_OUTPUT);

    let result = import_with(&go, repo.path()).unwrap();

    assert_eq!(result.declarations.len(), 2);
    assert_eq!(fake_go_calls(bin.path()).len(), 1);
}

#[test]
#[serial]
fn test_non_zero_exit_is_an_error() {
    let repo = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    write_repo(repo.path());
    let go = write_fake_go(bin.path(), LIST_OUTPUT, DOWNLOAD_OUTPUT);
    fs::write(bin.path().join("exit_code"), "1").unwrap();
    let before = snapshot_tree(repo.path());

    let result = import_with(&go, repo.path());

    match result {
        Err(RepoError::Toolchain { command, .. }) => {
            assert!(command.starts_with("go list"), "command: {}", command)
        }
        other => panic!("expected toolchain error, got {:?}", other),
    }
    assert_eq!(snapshot_tree(repo.path()), before);
}

#[test]
#[serial]
fn test_malformed_output_is_a_decode_error() {
    let repo = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    write_repo(repo.path());
    let go = write_fake_go(bin.path(), "{\"Path\": \"example.org/a\", oops", "");

    let result = import_with(&go, repo.path());

    assert!(matches!(result, Err(RepoError::Decode { .. })));
}

#[test]
#[serial]
fn test_missing_binary_is_a_toolchain_error() {
    let repo = TempDir::new().unwrap();
    write_repo(repo.path());

    let result = import_with(Path::new("/nonexistent/bin/go"), repo.path());

    assert!(matches!(result, Err(RepoError::Toolchain { .. })));
}
