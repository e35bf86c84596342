//! GitHub release access
//!
//! This module provides:
//! - The HTTP client used for release feeds and downloads
//! - Parsing of the `releases.atom` feed
//! - Release and response types shared with the resolver

pub mod client;
pub mod feed;
pub mod types;

pub use client::ReleaseHttpClient;
pub use types::{HttpResponse, InstalledBinary, ReleaseCandidate, ReleaseType};
