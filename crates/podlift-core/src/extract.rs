//! Archive extraction.
//!
//! Unpacks the pod's gzip tar source archive into the workspace.
//! Framework bundles rely on symlinks (`Versions/Current`, the
//! top-level binary link), so entries are unpacked with types and
//! modes preserved.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors raised while extracting the source archive.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Decompression or filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or hostile archive contents.
    #[error("archive error: {0}")]
    Archive(String),
}

/// Extract a tar.gz archive into `dest_dir`, returning the extracted
/// file paths relative to `dest_dir`.
pub fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let file = File::open(archive_path)?;
    let reader = BufReader::new(file);
    let gz_decoder = flate2::read::GzDecoder::new(reader);

    extract_tar(gz_decoder, dest_dir)
}

/// Extract a tar archive from a reader.
fn extract_tar<R: Read>(reader: R, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    fs::create_dir_all(dest_dir)?;

    let mut archive = tar::Archive::new(reader);
    let mut extracted_files = Vec::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        let relative_path = sanitize(&entry.path()?)?;

        if entry.header().entry_type().is_dir() {
            fs::create_dir_all(dest_dir.join(&relative_path))?;
            continue;
        }

        let absolute_path = dest_dir.join(&relative_path);
        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Preserves symlinks and file modes.
        entry.unpack(&absolute_path)?;

        extracted_files.push(relative_path);
    }

    Ok(extracted_files)
}

/// Reject absolute paths and parent-directory components so no entry
/// can escape the destination.
fn sanitize(path: &Path) -> Result<PathBuf, ExtractError> {
    let mut sanitized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => sanitized.push(part),
            Component::CurDir => {}
            _ => {
                return Err(ExtractError::Archive(format!(
                    "unsafe path in archive: {}",
                    path.display()
                )));
            }
        }
    }
    Ok(sanitized)
}
