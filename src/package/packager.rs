use crate::build::builder::LocalBuilder;
use crate::build::targets::Target;
use crate::core::path::ensure_dir;
use crate::core::{KilnError, KilnResult};
use crate::package::manifest::PackageManifest;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Packages a built library into the release tarball the resolver downloads
pub struct BinaryPackager<'a> {
    manifest: &'a PackageManifest,
}

impl<'a> BinaryPackager<'a> {
    /// Create a new packager
    pub fn new(manifest: &'a PackageManifest) -> Self {
        Self { manifest }
    }

    /// Build the library for `target` (host if `None`) and write its tarball into `out_dir`
    pub fn package(&self, target: Option<Target>, out_dir: &Path) -> KilnResult<PathBuf> {
        let builder = LocalBuilder::new(self.manifest).with_target(target);
        let library = builder.build()?;
        self.write_tarball(&library, &builder.target(), out_dir)
    }

    /// Tarball name for `target`, matching what the resolver requests
    pub fn tarball_filename(&self, target: &Target) -> String {
        target.tarball_filename(self.manifest.library_name(), &self.manifest.package.version)
    }

    /// Write `library` at the root of a gzipped tarball in `out_dir`
    pub fn write_tarball(
        &self,
        library: &Path,
        target: &Target,
        out_dir: &Path,
    ) -> KilnResult<PathBuf> {
        ensure_dir(out_dir)?;
        let archive_path = out_dir.join(self.tarball_filename(target));

        let file_name = library.file_name().ok_or_else(|| {
            KilnError::Path(format!("Invalid library path: {}", library.display()))
        })?;

        let encoder = GzEncoder::new(File::create(&archive_path)?, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.append_path_with_name(library, file_name)?;
        builder.into_inner()?.finish()?;

        Ok(archive_path)
    }
}
