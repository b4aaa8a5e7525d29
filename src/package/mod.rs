pub mod declaration;
pub mod ledger;
pub mod module;
pub mod render;

pub use declaration::{repo_name, synthesize, Declaration, Synthesis};
pub use ledger::{ChecksumLedger, LedgerEntry};
pub use module::{ModuleRecord, Replacement, MANIFEST_NAME};
pub use render::OutputFormat;
