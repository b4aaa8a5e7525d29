//! Turns the module graph of a Go module into repository declarations

use crate::core::path::absolutize;
use crate::core::{RepoError, RepoResult};
use crate::di::{ConfigProvider, ModuleToolchain, ServiceContainer};
use crate::package::declaration::{synthesize, Declaration};
use crate::package::ledger::ChecksumLedger;
use crate::resolver::module_index::{ModuleIndex, SkippedModule};
use crate::workspace::ManifestSnapshot;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What to import: the primary manifest and the repository containing it.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub manifest_path: PathBuf,
    pub repo_root: PathBuf,
}

impl ImportRequest {
    pub fn new(manifest_path: impl Into<PathBuf>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            repo_root: repo_root.into(),
        }
    }
}

/// Outcome of a successful import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    /// Declarations sorted by name.
    pub declarations: Vec<Declaration>,
    /// Modules replaced by local directories, which cannot be declared.
    pub skipped: Vec<SkippedModule>,
    /// `path@version` of modules whose checksum could not be determined.
    pub unresolved: Vec<String>,
}

impl ImportResult {
    /// True when every module in the graph became a declaration.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.unresolved.is_empty()
    }
}

/// Imports repository declarations from a module graph
pub struct RepoImporter {
    config: Arc<dyn ConfigProvider>,
    toolchain: Arc<dyn ModuleToolchain>,
}

impl RepoImporter {
    /// Create an importer with production dependencies
    pub fn new() -> RepoResult<Self> {
        let container = ServiceContainer::new()?;
        Ok(Self::from_container(&container))
    }

    pub fn from_container(container: &ServiceContainer) -> Self {
        Self::with_dependencies(container.config.clone(), container.toolchain.clone())
    }

    /// Create an importer with injected dependencies
    pub fn with_dependencies(
        config: Arc<dyn ConfigProvider>,
        toolchain: Arc<dyn ModuleToolchain>,
    ) -> Self {
        Self { config, toolchain }
    }

    /// Resolve the module graph of `request.manifest_path` into declarations.
    ///
    /// Steps:
    /// 1. Copy every manifest under the repository root to a private snapshot
    /// 2. List all modules in the snapshot copy of the primary manifest
    /// 3. Attach checksums from the ledger beside the primary manifest
    /// 4. Download the checksums still missing, in one invocation
    /// 5. Build declarations, sorted by name
    ///
    /// The user's tree is never written to, and the snapshot is removed on
    /// every exit path. Modules replaced by local directories and modules
    /// left without a checksum are reported in the result, not as errors.
    pub fn import_repos(&self, request: &ImportRequest) -> RepoResult<ImportResult> {
        let repo_root = absolutize(&request.repo_root)?;
        let manifest_path = absolutize(&request.manifest_path)?;

        if !repo_root.is_dir() {
            return Err(RepoError::Path(format!(
                "Repository root is not a directory: {}",
                repo_root.display()
            )));
        }
        if !manifest_path.is_file() {
            return Err(RepoError::Path(format!(
                "Manifest not found: {}",
                manifest_path.display()
            )));
        }

        let manifest_relative = relative_to_root(&manifest_path, &repo_root)?;
        let module_relative = manifest_relative
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let snapshot = ManifestSnapshot::create(&repo_root, self.config.manifest_file_name())?;
        if !snapshot.manifests().contains(&manifest_relative) {
            return Err(RepoError::Path(format!(
                "{} is not a module manifest (expected a file named {})",
                manifest_path.display(),
                self.config.manifest_file_name()
            )));
        }
        let module_dir = snapshot.module_dir(&module_relative);

        info!("listing modules for {}", manifest_path.display());
        let modules = self.toolchain.list_modules(&module_dir)?;
        debug!("decoding output of `{}`", modules.command());
        let mut index = ModuleIndex::from_records(modules)?;
        debug!("indexed {} module(s)", index.len());

        let ledger_path = manifest_path.with_file_name(self.config.ledger_file_name());
        let ledger = ChecksumLedger::load(&ledger_path)?;
        let matched = index.apply_ledger(&ledger);
        debug!(
            "{} of {} ledger entries matched a module",
            matched,
            ledger.len()
        );

        let downloaded = index.backfill(self.toolchain.as_ref(), &module_dir)?;
        if downloaded > 0 {
            info!("downloaded {} missing checksum(s)", downloaded);
        }

        let synthesis = synthesize(index.records());

        if let Err(e) = snapshot.close() {
            warn!("{}", e);
        }

        Ok(ImportResult {
            declarations: synthesis.declarations,
            skipped: index.skipped(),
            unresolved: synthesis.unresolved,
        })
    }
}

/// Path of `path` relative to `root`, which must contain it.
fn relative_to_root(path: &Path, root: &Path) -> RepoResult<PathBuf> {
    let relative = pathdiff::diff_paths(path, root).ok_or_else(|| {
        RepoError::Path(format!(
            "Cannot express {} relative to {}",
            path.display(),
            root.display()
        ))
    })?;

    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(RepoError::Path(format!(
            "{} is not inside repository root {}",
            path.display(),
            root.display()
        )));
    }

    Ok(relative)
}
