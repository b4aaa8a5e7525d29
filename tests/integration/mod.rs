//! Integration tests module
//!
//! Importer runs against the mock toolchain, a fake `go` subprocess, and
//! the `repogen` binary itself.

pub mod cli;
pub mod fake_go;
