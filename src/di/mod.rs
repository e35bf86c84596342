//! Dependency injection infrastructure for Kiln
//!
//! The resolver talks to the network and the filesystem only through the
//! traits in this module, so tests can swap in the fakes from [`mocks`].
//!
//! # Example (Production)
//! ```no_run
//! use kiln::config::Config;
//! use kiln::di::ServiceContainer;
//!
//! # fn example() -> kiln::core::KilnResult<()> {
//! let config = Config::default();
//! let container = ServiceContainer::new(&config, "lib".into())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use kiln::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let http = Arc::new(MockHttpProvider::new());
//! let unpacker = Arc::new(MockUnpacker::new());
//!
//! let container = ServiceContainer::with_providers(http, unpacker);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{HttpProvider, Unpacker};
