//! Kiln: prebuilt native libraries from GitHub releases
//!
//! This crate resolves a release tarball for a Rust package (either from the
//! version in Cargo.toml or by scanning the repository's release feed),
//! unpacks it, and falls back to a local cargo build when nothing is
//! published.

pub use kiln_core::{format_error_with_help, ErrorHelp, KilnError, KilnResult};

/// Core module re-exported from `kiln-core`.
pub mod core {
    pub use kiln_core::core::*;
    pub use kiln_core::{format_error_with_help, ErrorHelp};
}

/// User-level configuration.
pub mod config;

/// GitHub release feed and download access.
pub mod github;

/// Cargo.toml loading, release tarball packing and unpacking.
pub mod package;

/// Release resolution, targets and local builds.
pub mod build;

/// Dependency injection infrastructure.
pub mod di;
