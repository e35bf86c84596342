//! Package manifest, release tarball creation and unpacking

pub mod extractor;
pub mod manifest;
pub mod packager;

pub use manifest::{PackageManifest, PackageMetadata, ReleaseSettings};
