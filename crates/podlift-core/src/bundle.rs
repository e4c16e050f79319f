//! Final artifact packaging.
//!
//! Installs the framework metadata, swaps the merged dylib into the
//! bundle's versioned binary slot, and re-archives the workspace
//! contents as a distributable tar.gz. All paths are absolute; the
//! process working directory is never changed.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use thiserror::Error;

/// Errors raised while packaging the final artifact.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The property-list descriptor does not exist.
    #[error("metadata descriptor not found: {0}")]
    MissingPlist(PathBuf),

    /// Filesystem or tar failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Copy the property-list descriptor into the framework bundle.
pub fn install_plist(plist: &Path, framework_dir: &Path) -> Result<(), BundleError> {
    let name = plist
        .file_name()
        .filter(|_| plist.is_file())
        .ok_or_else(|| BundleError::MissingPlist(plist.to_path_buf()))?;

    fs::copy(plist, framework_dir.join(name))?;
    Ok(())
}

/// Move the merged dylib over the framework's versioned binary slot,
/// replacing the static archive that was linked from it.
pub fn replace_binary(merged: &Path, slot: &Path) -> Result<(), BundleError> {
    // Rename is atomic and fast; fall back to copy across filesystems.
    if fs::rename(merged, slot).is_err() {
        fs::copy(merged, slot)?;
        fs::remove_file(merged)?;
    }
    Ok(())
}

/// Archive every top-level entry of `content_dir` into `dest` as a
/// gzip tar. Symlink following is disabled so bundle symlinks are
/// archived as symlinks. `dest` must be absolute.
pub fn create_archive(content_dir: &Path, dest: &Path) -> Result<(), BundleError> {
    let file = File::create(dest)?;
    let writer = BufWriter::new(file);
    let encoder = GzEncoder::new(writer, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    let mut entries: Vec<fs::DirEntry> =
        fs::read_dir(content_dir)?.collect::<Result<_, io::Error>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let name = PathBuf::from(entry.file_name());
        if path.is_dir() && !path.is_symlink() {
            builder.append_dir_all(&name, &path)?;
        } else {
            builder.append_path_with_name(&path, &name)?;
        }
    }

    builder.finish()?;
    let encoder = builder.into_inner()?;
    let writer = encoder.finish()?;
    writer.into_inner().map_err(io::IntoInnerError::into_error)?;

    Ok(())
}
