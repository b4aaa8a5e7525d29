//! Repogen: Go module graphs to repository declarations
//!
//! This crate provides the main Repogen library, re-exporting core
//! functionality from `repogen-core` and organizing the modules that turn
//! the output of the go tool into checksum-verified declarations.

pub use repogen_core::{format_error_with_help, ErrorHelp, RepoError, RepoResult};

/// Core module re-exported from repogen-core.
pub mod core {
    pub use repogen_core::core::*;

    /// Path module re-exported from repogen-core.
    pub mod path {
        pub use repogen_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// Module records, the checksum ledger and declarations.
pub mod package;

/// Dependency graph resolution.
pub mod resolver;

/// Invocation of the go tool.
pub mod toolchain;

/// Manifest discovery and snapshots.
pub mod workspace;

pub use resolver::{ImportRequest, ImportResult, RepoImporter};
