use crate::core::{RepoError, RepoResult};
use crate::workspace::finder::ManifestFinder;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Private copy of every module manifest in a repository.
///
/// The go tool rewrites `go.mod` files it runs against, so commands run on
/// this copy instead of the user's tree. All manifests are copied, keeping
/// their relative layout, so relative `replace` directives resolve the same
/// way. The directory is removed when the snapshot is dropped or closed.
#[derive(Debug)]
pub struct ManifestSnapshot {
    dir: TempDir,
    manifests: Vec<PathBuf>,
}

impl ManifestSnapshot {
    /// Locate every `manifest_file_name` under `repo_root` and copy them.
    pub fn create(repo_root: &Path, manifest_file_name: &str) -> RepoResult<Self> {
        let manifests = ManifestFinder::find_module_manifests(repo_root, manifest_file_name)?;
        Self::copy_from(repo_root, manifests)
    }

    /// Copy the given manifests, relative to `repo_root`, into a new snapshot
    /// under the system temporary directory.
    pub fn copy_from(repo_root: &Path, manifests: Vec<PathBuf>) -> RepoResult<Self> {
        Self::copy_from_in(&std::env::temp_dir(), repo_root, manifests)
    }

    /// Like [`copy_from`](Self::copy_from), with the snapshot created inside
    /// `parent`.
    pub fn copy_from_in(
        parent: &Path,
        repo_root: &Path,
        manifests: Vec<PathBuf>,
    ) -> RepoResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix("repogen-gomod")
            .tempdir_in(parent)
            .map_err(|e| {
                RepoError::Snapshot(format!("Failed to create temporary directory: {}", e))
            })?;

        // An early return drops `dir`, removing whatever was copied so far.
        for relative in &manifests {
            copy_manifest(repo_root, dir.path(), relative)?;
        }

        debug!(
            "copied {} manifest(s) to {}",
            manifests.len(),
            dir.path().display()
        );
        Ok(Self { dir, manifests })
    }

    /// Root of the snapshot.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Manifests copied, relative to the snapshot root.
    pub fn manifests(&self) -> &[PathBuf] {
        &self.manifests
    }

    /// Map a repository-relative directory into the snapshot.
    pub fn module_dir(&self, relative_dir: &Path) -> PathBuf {
        self.dir.path().join(relative_dir)
    }

    /// Remove the snapshot now, reporting failure instead of ignoring it.
    pub fn close(self) -> RepoResult<()> {
        self.dir.close().map_err(|e| {
            RepoError::Snapshot(format!("Failed to remove temporary directory: {}", e))
        })
    }
}

fn copy_manifest(repo_root: &Path, snapshot_root: &Path, relative: &Path) -> RepoResult<()> {
    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(RepoError::Snapshot(format!(
            "Manifest path must be relative to the repository root: {}",
            relative.display()
        )));
    }

    let source = repo_root.join(relative);
    let target = snapshot_root.join(relative);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            RepoError::Snapshot(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    // Read and write rather than fs::copy so the copy is writable even when
    // the original is read-only.
    let content = fs::read(&source)
        .map_err(|e| RepoError::Snapshot(format!("Failed to read {}: {}", source.display(), e)))?;
    fs::write(&target, content)
        .map_err(|e| RepoError::Snapshot(format!("Failed to write {}: {}", target.display(), e)))?;

    Ok(())
}
