//! Trait definitions for dependency injection

use crate::core::KilnResult;
use crate::github::types::HttpResponse;
use async_trait::async_trait;
use std::path::PathBuf;

/// Trait for plain HTTP GET access
///
/// Implementations must not follow redirects: a 3xx is returned as-is with its
/// `Location` so the caller can classify every hop. Non-2xx statuses are
/// returned as responses, not errors; only transport failures are `Err`.
#[async_trait]
pub trait HttpProvider: Send + Sync {
    /// Issue a GET request
    async fn get(&self, url: &str) -> KilnResult<HttpResponse>;
}

/// Trait for unpacking a downloaded release tarball
pub trait Unpacker: Send + Sync {
    /// Unpack a gzipped tarball, returning the files written
    fn unpack(&self, tarball: &[u8]) -> KilnResult<Vec<PathBuf>>;
}
