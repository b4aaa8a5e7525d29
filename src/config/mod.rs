use crate::core::path::{config_file, ensure_dir};
use crate::core::{RepoError, RepoResult};
use crate::di::ConfigProvider;
use crate::package::{OutputFormat, MANIFEST_NAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the go executable
    ///
    /// When unset, `$GOROOT/bin/go` is used if GOROOT is set, otherwise
    /// `go` is looked up on PATH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_binary: Option<String>,

    /// File name of module manifests copied into the snapshot
    ///
    /// Must be `go.mod`: the go tool reads no other manifest name, so any
    /// other value is rejected when the config is loaded.
    #[serde(default = "default_manifest_file_name")]
    pub manifest_file_name: String,

    /// File name of the checksum ledger read beside the primary manifest
    #[serde(default = "default_ledger_file_name")]
    pub ledger_file_name: String,

    /// Output format for `repogen import`
    /// - "yaml": YAML list of declarations (default)
    /// - "json": JSON array of declarations
    /// - "starlark": go_repository(...) calls
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

fn default_manifest_file_name() -> String {
    MANIFEST_NAME.to_string()
}

fn default_ledger_file_name() -> String {
    crate::package::ledger::LEDGER_NAME.to_string()
}

fn default_output_format() -> String {
    "yaml".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            go_binary: None,
            manifest_file_name: default_manifest_file_name(),
            ledger_file_name: default_ledger_file_name(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Load config from platform-specific config directory, creating default if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\repogen\config.yaml
    /// - Linux: ~/.config/repogen/config.yaml
    /// - macOS: ~/Library/Application Support/repogen/config.yaml
    pub fn load() -> RepoResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> RepoResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| RepoError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save config to platform-specific config directory
    pub fn save(&self) -> RepoResult<()> {
        let config_path = config_file()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| RepoError::Path("Invalid config path".to_string()))?;

        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| RepoError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)?;
        Ok(())
    }

    fn validate(&self) -> RepoResult<()> {
        for (key, value) in [
            ("manifest_file_name", &self.manifest_file_name),
            ("ledger_file_name", &self.ledger_file_name),
        ] {
            if value.is_empty() || value.contains('/') || value.contains('\\') {
                return Err(RepoError::Config(format!(
                    "{} must be a plain file name, got '{}'",
                    key, value
                )));
            }
        }

        if self.manifest_file_name != MANIFEST_NAME {
            return Err(RepoError::Config(format!(
                "manifest_file_name must be '{}', the only manifest the go tool reads (got '{}')",
                MANIFEST_NAME,
                self.manifest_file_name
            )));
        }

        OutputFormat::parse(&self.output_format)?;
        Ok(())
    }
}

impl ConfigProvider for Config {
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
