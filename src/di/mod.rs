//! Dependency injection infrastructure for Repogen
//!
//! Configuration and the external module toolchain are reached through
//! traits so the importer can be driven by test doubles.
//!
//! # Example (Testing)
//! ```
//! use repogen::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let container = ServiceContainer::with_providers(
//!     Arc::new(MockConfigProvider::default()),
//!     Arc::new(MockToolchain::new(vec![])),
//! );
//! # let _ = container;
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ConfigProvider, ModuleToolchain};
