//! Index of the resolved module graph, keyed by `path@version`

use crate::core::RepoResult;
use crate::di::ModuleToolchain;
use crate::package::ledger::ChecksumLedger;
use crate::package::module::{module_key, ModuleRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// A module left out because it is replaced by a directory on disk.
///
/// Such modules cannot be declared as external repositories; the caller
/// has to map them to local packages itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedModule {
    pub path: String,
    pub version: String,
    pub replace: String,
}

/// Modules of one import run, keyed by effective `path@version`.
///
/// The main module is never indexed. A record whose key is already present
/// only contributes its checksum; the first record keeps its identity.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    modules: HashMap<String, ModuleRecord>,
    skipped: Vec<SkippedModule>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from decoded records, stopping at the first error.
    pub fn from_records<I>(records: I) -> RepoResult<Self>
    where
        I: IntoIterator<Item = RepoResult<ModuleRecord>>,
    {
        let mut index = Self::new();
        for record in records {
            index.insert(record?);
        }
        Ok(index)
    }

    /// Add a record. Returns false when the record was not indexed
    /// (main module or local replacement).
    pub fn insert(&mut self, record: ModuleRecord) -> bool {
        if record.main {
            return false;
        }

        if record.has_local_replacement() {
            let replace = record
                .replace
                .as_ref()
                .map(|r| r.path.clone())
                .unwrap_or_default();
            warn!(
                "skipping filepath replace directive {} -> {} (declare the local module explicitly instead)",
                record.path, replace
            );
            self.skipped.push(SkippedModule {
                path: record.path,
                version: record.version,
                replace,
            });
            return false;
        }

        let key = record.key();
        match self.modules.get_mut(&key) {
            Some(existing) => {
                debug!("duplicate module {}, keeping first record", key);
                if !record.sum.is_empty() {
                    existing.sum = record.sum;
                }
            }
            None => {
                self.modules.insert(key, record);
            }
        }
        true
    }

    /// Attach ledger checksums to matching modules. Returns the number of
    /// entries that matched; the rest are ignored.
    pub fn apply_ledger(&mut self, ledger: &ChecksumLedger) -> usize {
        let mut matched = 0;
        for entry in &ledger.entries {
            if let Some(module) = self
                .modules
                .get_mut(&module_key(&entry.path, &entry.version))
            {
                module.sum = entry.hash.clone();
                matched += 1;
            }
        }
        matched
    }

    /// Keys of modules still without a checksum, sorted.
    pub fn missing_sums(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .modules
            .iter()
            .filter(|(_, module)| module.sum.is_empty())
            .map(|(key, _)| key.clone())
            .collect();
        missing.sort();
        missing
    }

    /// Attach checksums reported by a download. Returns how many modules
    /// received one.
    pub fn apply_downloads<I>(&mut self, downloads: I) -> RepoResult<usize>
    where
        I: IntoIterator<Item = RepoResult<ModuleRecord>>,
    {
        let mut resolved = 0;
        for download in downloads {
            let download = download?;
            if download.sum.is_empty() {
                continue;
            }
            if let Some(module) = self
                .modules
                .get_mut(&module_key(&download.path, &download.version))
            {
                module.sum = download.sum;
                resolved += 1;
            }
        }
        Ok(resolved)
    }

    /// Ask the toolchain for every missing checksum in a single invocation.
    /// Does nothing when no checksum is missing.
    pub fn backfill(&mut self, toolchain: &dyn ModuleToolchain, dir: &Path) -> RepoResult<usize> {
        let missing = self.missing_sums();
        if missing.is_empty() {
            return Ok(0);
        }

        debug!("downloading checksums for {} module(s)", missing.len());
        let downloads = toolchain.download_sums(dir, &missing)?;
        debug!("decoding output of `{}`", downloads.command());
        self.apply_downloads(downloads)
    }

    pub fn get(&self, key: &str) -> Option<&ModuleRecord> {
        self.modules.get(key)
    }

    /// Indexed records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.modules.values()
    }

    /// Modules skipped for local replacements, sorted by path and version.
    pub fn skipped(&self) -> Vec<SkippedModule> {
        let mut skipped = self.skipped.clone();
        skipped.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.version.cmp(&b.version)));
        skipped
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
