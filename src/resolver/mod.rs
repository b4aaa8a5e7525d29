//! Resolution of the module graph into repository declarations.

pub mod importer;
pub mod module_index;

pub use importer::{ImportRequest, ImportResult, RepoImporter};
pub use module_index::{ModuleIndex, SkippedModule};
