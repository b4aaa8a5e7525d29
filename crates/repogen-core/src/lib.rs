//! Core utilities shared by the Repogen binary and library: the error type,
//! CLI error hints and path helpers.

pub mod core;

pub use crate::core::{format_error_with_help, ErrorHelp, RepoError, RepoResult};
