use crate::core::path::ensure_dir;
use crate::core::{KilnError, KilnResult};
use crate::di::traits::Unpacker;
use flate2::read::GzDecoder;
use std::path::PathBuf;
use tar::{Archive, EntryType};
use tracing::debug;

/// Unpacks release tarballs (tar.gz) into an install directory
pub struct TarballUnpacker {
    dest_dir: PathBuf,
}

impl TarballUnpacker {
    /// Create a new TarballUnpacker
    pub fn new(dest_dir: PathBuf) -> Self {
        Self { dest_dir }
    }

    /// Unpack a gzipped tarball held in memory
    ///
    /// Entries are written relative to the destination directory; any entry
    /// that would land outside it fails the whole unpack.
    pub fn unpack_bytes(&self, tarball: &[u8]) -> KilnResult<Vec<PathBuf>> {
        ensure_dir(&self.dest_dir)?;

        let mut archive = Archive::new(GzDecoder::new(tarball));
        let entries = archive
            .entries()
            .map_err(|e| KilnError::Unpack(format!("Invalid tarball: {}", e)))?;

        let mut files = Vec::new();
        for entry in entries {
            let mut entry =
                entry.map_err(|e| KilnError::Unpack(format!("Invalid tarball entry: {}", e)))?;
            let rel_path = entry
                .path()
                .map_err(|e| KilnError::Unpack(format!("Invalid entry path: {}", e)))?
                .into_owned();
            let is_file = entry.header().entry_type() == EntryType::Regular;

            let unpacked = entry.unpack_in(&self.dest_dir).map_err(|e| {
                KilnError::Unpack(format!("Failed to unpack {}: {}", rel_path.display(), e))
            })?;
            if !unpacked {
                return Err(KilnError::Unpack(format!(
                    "Refusing to unpack {} outside {}",
                    rel_path.display(),
                    self.dest_dir.display()
                )));
            }

            if is_file {
                debug!(path = %rel_path.display(), "unpacked");
                files.push(self.dest_dir.join(&rel_path));
            }
        }

        Ok(files)
    }
}

impl Unpacker for TarballUnpacker {
    fn unpack(&self, tarball: &[u8]) -> KilnResult<Vec<PathBuf>> {
        self.unpack_bytes(tarball)
    }
}

#[cfg(test)]
pub(crate) fn build_tarball(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}
