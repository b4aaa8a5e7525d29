use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The manifest snapshot could not be created or populated.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// An external toolchain command could not be started or exited unsuccessfully.
    #[error("`{command}` failed: {message}")]
    Toolchain { command: String, message: String },

    /// The output of an external toolchain command could not be decoded.
    #[error("Could not decode output of `{command}`: {message}")]
    Decode { command: String, message: String },
}

impl RepoError {
    /// Shorthand for a [`RepoError::Toolchain`] error.
    pub fn toolchain(command: impl Into<String>, message: impl Into<String>) -> Self {
        RepoError::Toolchain {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`RepoError::Decode`] error.
    pub fn decode(command: impl Into<String>, message: impl Into<String>) -> Self {
        RepoError::Decode {
            command: command.into(),
            message: message.into(),
        }
    }
}
