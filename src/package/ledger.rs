use crate::core::{RepoError, RepoResult};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Default checksum ledger file name.
pub const LEDGER_NAME: &str = "go.sum";

/// Version suffix of entries that hash a module's `go.mod` only.
const MANIFEST_SUFFIX: &str = "/go.mod";

/// One usable `path version hash` line of the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub path: String,
    pub version: String,
    pub hash: String,
}

/// Content checksums recorded in `go.sum`.
#[derive(Debug, Clone, Default)]
pub struct ChecksumLedger {
    pub entries: Vec<LedgerEntry>,
}

impl ChecksumLedger {
    /// Load the ledger at `path`. A missing file is an empty ledger.
    pub fn load(path: &Path) -> RepoResult<Self> {
        match fs::read(path) {
            Ok(content) => Ok(Self::from_bytes(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(RepoError::Io(e)),
        }
    }

    /// Parse raw ledger bytes. Lines that are not valid UTF-8 are skipped
    /// like any other unusable line.
    pub fn from_bytes(content: &[u8]) -> Self {
        let entries = content
            .split(|&b| b == b'\n')
            .filter_map(|line| std::str::from_utf8(line).ok())
            .filter_map(parse_line)
            .collect();

        Self { entries }
    }

    /// Parse ledger text, dropping blank or malformed lines and
    /// `go.mod`-only entries.
    pub fn parse(content: &str) -> Self {
        Self {
            entries: content.lines().filter_map(parse_line).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Option<LedgerEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [path, version, hash] if !version.ends_with(MANIFEST_SUFFIX) => Some(LedgerEntry {
            path: path.to_string(),
            version: version.to_string(),
            hash: hash.to_string(),
        }),
        _ => None,
    }
}
