use repogen::config::Config;
use repogen::core::path::find_workspace_root;
use repogen::core::{RepoError, RepoResult};
use repogen::workspace::ManifestFinder;
use std::env;
use std::path::PathBuf;

pub fn run(repo_root: Option<PathBuf>) -> RepoResult<()> {
    let config = Config::load()?;
    let current_dir = env::current_dir()
        .map_err(|e| RepoError::Path(format!("Failed to get current directory: {}", e)))?;

    let repo_root = match repo_root {
        Some(root) => current_dir.join(root),
        None => find_workspace_root(&current_dir).unwrap_or(current_dir),
    };

    let manifests = ManifestFinder::find_module_manifests(&repo_root, &config.manifest_file_name)?;
    if manifests.is_empty() {
        eprintln!(
            "No {} files found under {}",
            config.manifest_file_name,
            repo_root.display()
        );
        return Ok(());
    }

    for manifest in &manifests {
        println!("{}", manifest.display());
    }

    Ok(())
}
