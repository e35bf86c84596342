//! Service container for dependency injection

use super::traits::{HttpProvider, Unpacker};
use crate::config::Config;
use crate::core::KilnResult;
use crate::github::client::ReleaseHttpClient;
use crate::package::extractor::TarballUnpacker;
use std::path::PathBuf;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the collaborators the resolver needs as trait objects, so tests
/// can swap in fakes.
///
/// # Example (Testing)
///
/// ```
/// use kiln::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let container = ServiceContainer::with_providers(
///     Arc::new(MockHttpProvider::new()),
///     Arc::new(MockUnpacker::new()),
/// );
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub http: Arc<dyn HttpProvider>,
    pub unpacker: Arc<dyn Unpacker>,
}

impl ServiceContainer {
    /// Create a service container with production implementations
    ///
    /// Release tarballs are unpacked into `install_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. an invalid
    /// token in the config).
    pub fn new(config: &Config, install_dir: PathBuf) -> KilnResult<Self> {
        Ok(Self {
            http: Arc::new(ReleaseHttpClient::new(config)?),
            unpacker: Arc::new(TarballUnpacker::new(install_dir)),
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(http: Arc<dyn HttpProvider>, unpacker: Arc<dyn Unpacker>) -> Self {
        Self { http, unpacker }
    }
}
