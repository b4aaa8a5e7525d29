use crate::core::error::{RepoError, RepoResult};
use std::path::{Component, Path, PathBuf};

/// Files that mark the root of a build workspace.
pub const WORKSPACE_MARKERS: &[&str] = &["WORKSPACE", "WORKSPACE.bazel", "MODULE.bazel"];

/// Get the Repogen home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\repogen
/// - Linux: ~/.config/repogen
/// - macOS: ~/Library/Application Support/repogen
pub fn repogen_home() -> RepoResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| RepoError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("repogen"))
}

/// Get the config file path (`<repogen_home>/config.yaml`)
pub fn config_file() -> RepoResult<PathBuf> {
    Ok(repogen_home()?.join("config.yaml"))
}

/// Find the build workspace root by walking up from `start`.
///
/// Returns the first ancestor (including `start`) holding one of
/// [`WORKSPACE_MARKERS`], or `None` when the filesystem root is reached.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if WORKSPACE_MARKERS
            .iter()
            .any(|marker| current.join(marker).is_file())
        {
            return Some(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> RepoResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Lexically normalize a path: drop `.` components and fold `..` into
/// the preceding component where there is one. Symlinks are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }

    normalized
}

/// Make `path` absolute against the current directory and normalize it.
pub fn absolutize(path: &Path) -> RepoResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| RepoError::Path(format!("Failed to get current directory: {}", e)))?
            .join(path)
    };
    Ok(normalize_path(&absolute))
}
