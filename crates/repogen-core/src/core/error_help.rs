use crate::core::error::RepoError;

/// Attaches a short, actionable hint to an error for display in the CLI.
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for RepoError {
    fn help(&self) -> Option<String> {
        match self {
            RepoError::Toolchain { command, .. } if command.starts_with("go") => Some(
                "Make sure the go tool is installed and on PATH, or set GOROOT, \
                 or pass --go / set go_binary in config.yaml."
                    .to_string(),
            ),
            RepoError::Decode { .. } => Some(
                "The go tool produced output repogen could not read. Re-run with \
                 RUST_LOG=debug to see each step."
                    .to_string(),
            ),
            RepoError::WalkDir(_) => Some(
                "A directory under the repository root could not be read. Check its permissions."
                    .to_string(),
            ),
            RepoError::Snapshot(_) => Some(
                "Check that the system temporary directory is writable (see TMPDIR).".to_string(),
            ),
            RepoError::Config(_) | RepoError::Yaml(_) => {
                Some("Fix or remove config.yaml in the repogen config directory.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error followed by its hint, if it has one.
pub fn format_error_with_help(err: &RepoError) -> String {
    match err.help() {
        Some(help) => format!("Error: {}\n\n  Help: {}", err, help),
        None => format!("Error: {}", err),
    }
}
