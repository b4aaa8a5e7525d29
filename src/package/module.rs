use serde::{Deserialize, Serialize};
use std::path::Path;

/// The only manifest file name the go tool reads.
pub const MANIFEST_NAME: &str = "go.mod";

/// Target of a `replace` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Replacement {
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// One node of the module graph, as reported by `go list -m -json` or
/// `go mod download -json`.
///
/// Only the fields repogen needs are decoded; everything else the go tool
/// prints (`Time`, `Dir`, `GoMod`, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleRecord {
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub main: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<Replacement>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sum: String,
}

impl ModuleRecord {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Redirect this module to `path@version`.
    pub fn replaced_by(mut self, path: impl Into<String>, version: impl Into<String>) -> Self {
        self.replace = Some(Replacement {
            path: path.into(),
            version: version.into(),
        });
        self
    }

    pub fn with_sum(mut self, sum: impl Into<String>) -> Self {
        self.sum = sum.into();
        self
    }

    /// Path of the module actually fetched: the replace target if any.
    pub fn effective_path(&self) -> &str {
        match &self.replace {
            Some(replace) => &replace.path,
            None => &self.path,
        }
    }

    /// Version of the module actually fetched: the replace target's if any.
    pub fn effective_version(&self) -> &str {
        match &self.replace {
            Some(replace) => &replace.version,
            None => &self.version,
        }
    }

    /// Lookup key, `effective_path@effective_version`.
    pub fn key(&self) -> String {
        module_key(self.effective_path(), self.effective_version())
    }

    /// True when the module is redirected to a directory on disk rather
    /// than to another module.
    pub fn has_local_replacement(&self) -> bool {
        self.replace
            .as_ref()
            .is_some_and(|replace| is_local_path(&replace.path))
    }
}

pub fn module_key(path: &str, version: &str) -> String {
    format!("{}@{}", path, version)
}

/// Whether a replace target names a filesystem path: absolute, or
/// relative starting with `.` or `..`.
pub fn is_local_path(path: &str) -> bool {
    path == "."
        || path == ".."
        || path.starts_with("./")
        || path.starts_with("../")
        || (cfg!(windows) && (path.starts_with(".\\") || path.starts_with("..\\")))
        || Path::new(path).is_absolute()
}
