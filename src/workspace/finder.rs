use crate::core::path::find_workspace_root;
use crate::core::{RepoError, RepoResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Locates module manifests and the build workspace root.
pub struct ManifestFinder;

impl ManifestFinder {
    /// Find the build workspace root by walking up the directory tree
    ///
    /// Looks for WORKSPACE, WORKSPACE.bazel or MODULE.bazel.
    pub fn find_workspace_root(start_dir: &Path) -> Option<PathBuf> {
        find_workspace_root(start_dir)
    }

    /// Find every manifest named `file_name` under `repo_root`
    ///
    /// Returns paths relative to `repo_root`, sorted. Nested modules are
    /// included since relative `replace` directives may point at them. Any
    /// unreadable directory fails the whole search: a partial manifest set
    /// would silently lose replace targets.
    pub fn find_module_manifests(repo_root: &Path, file_name: &str) -> RepoResult<Vec<PathBuf>> {
        let mut manifests = Vec::new();

        for entry in WalkDir::new(repo_root) {
            let entry = entry?;
            if entry.file_name() != file_name {
                continue;
            }
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let relative = entry.path().strip_prefix(repo_root).map_err(|_| {
                RepoError::Path(format!(
                    "{} is not under {}",
                    entry.path().display(),
                    repo_root.display()
                ))
            })?;
            manifests.push(relative.to_path_buf());
        }

        manifests.sort();
        Ok(manifests)
    }
}
