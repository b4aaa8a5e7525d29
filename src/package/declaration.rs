use crate::package::module::ModuleRecord;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A resolved, checksum-backed external repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub importpath: String,
    /// Module path fetched instead of `importpath`, for redirected modules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<String>,
    pub sum: String,
    pub version: String,
}

impl Declaration {
    /// Build the declaration for a record. Returns `None` while the record
    /// has no checksum.
    pub fn from_record(record: &ModuleRecord) -> Option<Self> {
        if record.sum.is_empty() {
            return None;
        }

        let (replace, version) = match &record.replace {
            Some(target) => (Some(target.path.clone()), target.version.clone()),
            None => (None, record.version.clone()),
        };

        Some(Self {
            name: repo_name(&record.path),
            importpath: record.path.clone(),
            replace,
            sum: record.sum.clone(),
            version,
        })
    }
}

/// Derive a repository name from a module path.
///
/// The host labels are reversed and joined with the remaining path
/// elements, so `github.com/Foo/bar-baz` becomes `com_github_foo_bar_baz`.
/// Every character outside `[a-z0-9_]` maps to `_`.
pub fn repo_name(import_path: &str) -> String {
    let lowered = import_path.to_lowercase();
    let mut elements = lowered.split('/');
    let host = elements.next().unwrap_or_default();

    let mut parts: Vec<&str> = host.split('.').rev().collect();
    parts.extend(elements);

    parts
        .join("_")
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Declarations built from a set of records, plus the keys of records that
/// still had no checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Synthesis {
    pub declarations: Vec<Declaration>,
    pub unresolved: Vec<String>,
}

/// Build one declaration per record with a checksum, sorted by name.
/// Records without a checksum are reported and left out.
pub fn synthesize<'a, I>(records: I) -> Synthesis
where
    I: IntoIterator<Item = &'a ModuleRecord>,
{
    let mut synthesis = Synthesis::default();

    for record in records {
        match Declaration::from_record(record) {
            Some(declaration) => synthesis.declarations.push(declaration),
            None => {
                let key = record.key();
                warn!("could not determine sum for module {}", key);
                synthesis.unresolved.push(key);
            }
        }
    }

    sort_declarations(&mut synthesis.declarations);
    synthesis.unresolved.sort();
    synthesis
}

/// Sort declarations by name, byte-wise, with the import path breaking ties.
pub fn sort_declarations(declarations: &mut [Declaration]) {
    declarations.sort_by(|a, b| {
        a.name
            .as_bytes()
            .cmp(b.name.as_bytes())
            .then_with(|| a.importpath.as_bytes().cmp(b.importpath.as_bytes()))
    });
}
