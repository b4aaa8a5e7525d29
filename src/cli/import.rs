use repogen::config::Config;
use repogen::core::path::find_workspace_root;
use repogen::core::{RepoError, RepoResult};
use repogen::di::ServiceContainer;
use repogen::package::OutputFormat;
use repogen::{ImportRequest, ImportResult, RepoImporter};
use std::env;
use std::path::{Path, PathBuf};

/// Options for `repogen import`
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub manifest: Option<PathBuf>,
    pub repo_root: Option<PathBuf>,
    pub format: Option<String>,
    pub go: Option<String>,
}

pub fn run(options: ImportOptions) -> RepoResult<()> {
    let mut config = Config::load()?;
    if let Some(go) = options.go {
        config.go_binary = Some(go);
    }

    let format = OutputFormat::parse(
        options
            .format
            .as_deref()
            .unwrap_or(config.output_format.as_str()),
    )?;

    let current_dir = env::current_dir()
        .map_err(|e| RepoError::Path(format!("Failed to get current directory: {}", e)))?;
    let request = resolve_request(
        &current_dir,
        options.manifest,
        options.repo_root,
        &config.manifest_file_name,
    );

    let container = ServiceContainer::with_config(config);
    let result = RepoImporter::from_container(&container).import_repos(&request)?;

    print!("{}", format.render(&result.declarations)?);
    report(&result);

    Ok(())
}

/// Fill in defaults for the manifest and repository root.
///
/// Without `--repo-root` the build workspace root above the manifest (or
/// the current directory) is used, falling back to the manifest's own
/// directory. Without `--manifest` the manifest at the repository root is
/// used.
fn resolve_request(
    current_dir: &Path,
    manifest: Option<PathBuf>,
    repo_root: Option<PathBuf>,
    manifest_file_name: &str,
) -> ImportRequest {
    let manifest = manifest.map(|m| current_dir.join(m));
    let repo_root = repo_root.map(|r| current_dir.join(r));

    match (manifest, repo_root) {
        (Some(manifest), Some(repo_root)) => ImportRequest::new(manifest, repo_root),
        (Some(manifest), None) => {
            let manifest_dir = manifest
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| current_dir.to_path_buf());
            let repo_root = find_workspace_root(&manifest_dir).unwrap_or(manifest_dir);
            ImportRequest::new(manifest, repo_root)
        }
        (None, repo_root) => {
            let repo_root = repo_root
                .or_else(|| find_workspace_root(current_dir))
                .unwrap_or_else(|| current_dir.to_path_buf());
            ImportRequest::new(repo_root.join(manifest_file_name), repo_root)
        }
    }
}

fn report(result: &ImportResult) {
    eprintln!(
        "✓ {} repository declaration(s)",
        result.declarations.len()
    );

    if !result.skipped.is_empty() {
        eprintln!(
            "⚠ Skipped {} module(s) replaced by local directories:",
            result.skipped.len()
        );
        for module in &result.skipped {
            eprintln!("  {}@{} => {}", module.path, module.version, module.replace);
        }
    }

    if !result.unresolved.is_empty() {
        eprintln!(
            "⚠ Could not determine sums for {} module(s):",
            result.unresolved.len()
        );
        for key in &result.unresolved {
            eprintln!("  {}", key);
        }
    }
}
