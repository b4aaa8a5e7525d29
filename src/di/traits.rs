//! Trait definitions for dependency injection

use crate::core::RepoResult;
use crate::toolchain::ModuleStream;
use std::path::Path;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Explicit path to the go tool, if configured
    fn go_binary(&self) -> Option<&str>;

    /// File name of module manifests (e.g., "go.mod")
    fn manifest_file_name(&self) -> &str;

    /// File name of the checksum ledger beside the manifest (e.g., "go.sum")
    fn ledger_file_name(&self) -> &str;

    /// Default output format (e.g., "yaml", "json", "starlark")
    fn output_format(&self) -> &str;
}

/// Trait for the module toolchain
///
/// Runs the two external commands repogen depends on. Each call starts at
/// most one process and returns its output as a lazily decoded stream.
pub trait ModuleToolchain: Send + Sync {
    /// Enumerate every module in the build list of the module in `dir`,
    /// including indirect dependencies (`go list -m -json all`).
    fn list_modules(&self, dir: &Path) -> RepoResult<ModuleStream>;

    /// Resolve checksums for the given `path@version` identities in one
    /// invocation (`go mod download -json <module>...`). Identities the tool
    /// cannot resolve are absent from the output.
    fn download_sums(&self, dir: &Path, modules: &[String]) -> RepoResult<ModuleStream>;
}
