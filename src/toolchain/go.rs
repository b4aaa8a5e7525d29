use crate::core::{RepoError, RepoResult};
use crate::di::{ConfigProvider, ModuleToolchain};
use crate::toolchain::ModuleStream;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs the `go` command in a directory containing a `go.mod` file.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    go: PathBuf,
}

impl GoToolchain {
    pub fn new(go: impl Into<PathBuf>) -> Self {
        Self { go: go.into() }
    }

    /// Use the go tool named by the configuration, or locate one.
    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        Self::new(find_go_tool(config.go_binary()))
    }

    /// Path of the go executable this toolchain runs.
    pub fn go(&self) -> &Path {
        &self.go
    }

    fn spawn(&self, dir: &Path, label: String, args: &[String]) -> RepoResult<ModuleStream> {
        debug!("running {} in {}", label, dir.display());

        // stderr is inherited so download progress and errors reach the user.
        let child = Command::new(&self.go)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                RepoError::toolchain(
                    &label,
                    format!("could not start {}: {}", self.go.display(), e),
                )
            })?;

        ModuleStream::from_child(label, child)
    }
}

impl ModuleToolchain for GoToolchain {
    fn list_modules(&self, dir: &Path) -> RepoResult<ModuleStream> {
        let args: Vec<String> = ["list", "-m", "-json", "all"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        self.spawn(dir, "go list -m -json all".to_string(), &args)
    }

    fn download_sums(&self, dir: &Path, modules: &[String]) -> RepoResult<ModuleStream> {
        let mut args: Vec<String> = ["mod", "download", "-json"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        args.extend(modules.iter().cloned());

        let label = match modules {
            [module] => format!("go mod download -json {}", module),
            _ => format!("go mod download -json ({} modules)", modules.len()),
        };
        self.spawn(dir, label, &args)
    }
}

/// Locate the go executable.
///
/// Order: the configured path, then `$GOROOT/bin/go` (a build system
/// wrapper sets GOROOT to its configured SDK, which must win over the host
/// one), then `go` on PATH, finally the bare name.
pub fn find_go_tool(configured: Option<&str>) -> PathBuf {
    if let Some(path) = configured.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let exe = if cfg!(windows) { "go.exe" } else { "go" };

    if let Some(goroot) = env::var_os("GOROOT").filter(|v| !v.is_empty()) {
        return PathBuf::from(goroot).join("bin").join(exe);
    }

    which::which("go").unwrap_or_else(|_| PathBuf::from(exe))
}
