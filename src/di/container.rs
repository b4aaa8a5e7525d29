//! Service container for dependency injection

use super::traits::{ConfigProvider, ModuleToolchain};
use crate::config::Config;
use crate::core::RepoResult;
use crate::toolchain::GoToolchain;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the configuration and the module toolchain as trait objects so
/// tests can swap in [`MockToolchain`](super::mocks::MockToolchain) or
/// [`MockConfigProvider`](super::mocks::MockConfigProvider).
///
/// # Example (Testing)
///
/// ```
/// use repogen::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let config = Arc::new(MockConfigProvider::default());
/// let toolchain = Arc::new(MockToolchain::new(vec![]));
///
/// let container = ServiceContainer::with_providers(config, toolchain);
/// assert_eq!(container.config().manifest_file_name(), "go.mod");
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub toolchain: Arc<dyn ModuleToolchain>,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// Loads config from disk and locates the go tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or created.
    pub fn new() -> RepoResult<Self> {
        Ok(Self::with_config(Config::load()?))
    }

    /// Create a container around an already loaded configuration
    pub fn with_config(config: Config) -> Self {
        let toolchain = GoToolchain::from_config(&config);
        Self {
            config: Arc::new(config),
            toolchain: Arc::new(toolchain),
        }
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        toolchain: Arc<dyn ModuleToolchain>,
    ) -> Self {
        Self { config, toolchain }
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the module toolchain
    pub fn toolchain(&self) -> &dyn ModuleToolchain {
        self.toolchain.as_ref()
    }
}
