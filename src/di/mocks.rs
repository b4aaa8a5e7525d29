//! Mock implementations of service traits for testing

use super::traits::{ConfigProvider, ModuleToolchain};
use crate::core::{RepoError, RepoResult};
use crate::package::module::{module_key, ModuleRecord, MANIFEST_NAME};
use crate::toolchain::ModuleStream;
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use repogen::di::mocks::MockConfigProvider;
/// use repogen::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.output_format = "json".to_string();
///
/// assert_eq!(config.output_format(), "json");
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub go_binary: Option<String>,
    pub manifest_file_name: String,
    pub ledger_file_name: String,
    pub output_format: String,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            go_binary: None,
            manifest_file_name: MANIFEST_NAME.to_string(),
            ledger_file_name: "go.sum".to_string(),
            output_format: "yaml".to_string(),
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn go_binary(&self) -> Option<&str> {
        self.go_binary.as_deref()
    }

    fn manifest_file_name(&self) -> &str {
        &self.manifest_file_name
    }

    fn ledger_file_name(&self) -> &str {
        &self.ledger_file_name
    }

    fn output_format(&self) -> &str {
        &self.output_format
    }
}

/// One recorded call on a [`MockToolchain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainCall {
    ListModules { dir: PathBuf },
    DownloadSums { dir: PathBuf, modules: Vec<String> },
}

/// Mock module toolchain for testing
///
/// Serves a fixed module list and a table of downloadable checksums, and
/// records every invocation with its arguments. With
/// `rewrite_manifests` set it appends to the `go.mod` in the directory it
/// is run in, like the real tool tends to.
///
/// # Example
///
/// ```
/// use repogen::di::mocks::MockToolchain;
/// use repogen::di::ModuleToolchain;
/// use repogen::package::ModuleRecord;
/// use std::path::Path;
///
/// let toolchain = MockToolchain::new(vec![ModuleRecord::new("example.org/a", "v1.0.0")])
///     .with_download("example.org/a", "v1.0.0", "h1:aaa=");
///
/// let modules: Vec<_> = toolchain.list_modules(Path::new(".")).unwrap().collect();
/// assert_eq!(modules.len(), 1);
/// assert_eq!(toolchain.calls().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockToolchain {
    modules: Vec<ModuleRecord>,
    downloads: HashMap<String, String>,
    pub rewrite_manifests: bool,
    pub fail_list: bool,
    pub fail_download: bool,
    calls: Arc<Mutex<Vec<ToolchainCall>>>,
}

impl MockToolchain {
    /// Create a toolchain whose `list_modules` yields `modules` in order
    pub fn new(modules: Vec<ModuleRecord>) -> Self {
        Self {
            modules,
            ..Default::default()
        }
    }

    /// Make `path@version` resolvable by `download_sums`
    pub fn with_download(mut self, path: &str, version: &str, sum: &str) -> Self {
        self.downloads
            .insert(module_key(path, version), sum.to_string());
        self
    }

    /// Append to the working copy of `go.mod` on every invocation
    pub fn rewriting_manifests(mut self) -> Self {
        self.rewrite_manifests = true;
        self
    }

    /// Every invocation so far, in order
    pub fn calls(&self) -> Vec<ToolchainCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Modules passed to `download_sums`, across all invocations
    pub fn downloaded_modules(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ToolchainCall::DownloadSums { modules, .. } => Some(modules),
                ToolchainCall::ListModules { .. } => None,
            })
            .flatten()
            .collect()
    }

    fn record(&self, call: ToolchainCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn touch_manifest(&self, dir: &Path) -> RepoResult<()> {
        if self.rewrite_manifests {
            let manifest = dir.join(MANIFEST_NAME);
            let mut content = fs::read_to_string(&manifest).unwrap_or_default();
            content.push_str("\nrequire example.org/injected v0.0.1\n");
            fs::write(&manifest, content)?;
        }
        Ok(())
    }

    fn stream(command: &str, records: &[ModuleRecord]) -> RepoResult<ModuleStream> {
        let mut output = String::new();
        for record in records {
            output.push_str(&serde_json::to_string_pretty(record)?);
            output.push('\n');
        }
        Ok(ModuleStream::from_reader(
            command,
            Cursor::new(output.into_bytes()),
        ))
    }
}

impl ModuleToolchain for MockToolchain {
    fn list_modules(&self, dir: &Path) -> RepoResult<ModuleStream> {
        self.record(ToolchainCall::ListModules {
            dir: dir.to_path_buf(),
        });
        self.touch_manifest(dir)?;

        if self.fail_list {
            return Err(RepoError::toolchain("go list -m -json all", "mock failure"));
        }
        Self::stream("go list -m -json all", &self.modules)
    }

    fn download_sums(&self, dir: &Path, modules: &[String]) -> RepoResult<ModuleStream> {
        self.record(ToolchainCall::DownloadSums {
            dir: dir.to_path_buf(),
            modules: modules.to_vec(),
        });
        self.touch_manifest(dir)?;

        if self.fail_download {
            return Err(RepoError::toolchain("go mod download -json", "mock failure"));
        }

        let found: Vec<ModuleRecord> = modules
            .iter()
            .filter_map(|key| {
                let sum = self.downloads.get(key)?;
                let (path, version) = key.rsplit_once('@')?;
                Some(ModuleRecord::new(path, version).with_sum(sum.as_str()))
            })
            .collect();
        Self::stream("go mod download -json", &found)
    }
}
