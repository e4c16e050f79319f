//! Build workspace management.
//!
//! A [`BuildWorkspace`] is a uniquely named temporary directory that
//! owns everything a run touches: the downloaded archive, the
//! extracted framework tree, and the per-architecture link outputs.
//! By default it is removed when dropped; [`BuildWorkspace::keep`]
//! leaks it for operator inspection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::target::Arch;

/// Directory holding the extracted archive contents. Only this
/// subtree is re-archived by the packager.
const CONTENT_DIR: &str = "content";
/// Directory holding the downloaded source archive.
const DOWNLOADS_DIR: &str = "downloads";
/// Directory holding per-architecture link outputs.
const OUTPUTS_DIR: &str = "outputs";

/// Temporary directory owning all intermediate artifacts of one run.
#[derive(Debug)]
pub struct BuildWorkspace {
    dir: TempDir,
}

impl BuildWorkspace {
    /// Create a fresh workspace under the system temp directory.
    pub fn create() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("podlift-").tempdir()?;
        for sub in [CONTENT_DIR, DOWNLOADS_DIR, OUTPUTS_DIR] {
            fs::create_dir(dir.path().join(sub))?;
        }
        Ok(Self { dir })
    }

    /// Root of the workspace.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Extraction root; its top-level entries become the final archive.
    pub fn content_dir(&self) -> PathBuf {
        self.dir.path().join(CONTENT_DIR)
    }

    /// Destination for the downloaded source archive.
    pub fn download_path(&self, filename: &str) -> PathBuf {
        self.dir.path().join(DOWNLOADS_DIR).join(filename)
    }

    /// The extracted framework bundle directory for a pod.
    pub fn framework_dir(&self, pod: &str) -> PathBuf {
        self.content_dir()
            .join("Frameworks")
            .join(format!("{pod}.framework"))
    }

    /// The framework's versioned binary slot.
    pub fn binary_slot(&self, pod: &str) -> PathBuf {
        self.framework_dir(pod).join("Versions").join("A").join(pod)
    }

    /// Distinctly named output file for one per-architecture link.
    pub fn linked_output(&self, pod: &str, arch: Arch) -> PathBuf {
        self.dir
            .path()
            .join(OUTPUTS_DIR)
            .join(format!("{pod}-{arch}.dylib"))
    }

    /// Output path for the merged universal dylib.
    pub fn merged_output(&self, pod: &str) -> PathBuf {
        self.dir
            .path()
            .join(OUTPUTS_DIR)
            .join(format!("{pod}_dynamic.dylib"))
    }

    /// Leak the workspace, returning its path. The directory is then
    /// only removed by the operating system's temp-cleanup policy.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_populates_subdirectories() {
        let workspace = BuildWorkspace::create().unwrap();
        assert!(workspace.content_dir().is_dir());
        assert!(workspace.download_path("x.tar.gz").parent().unwrap().is_dir());
        assert!(workspace.linked_output("Pkg", Arch::Arm64).parent().unwrap().is_dir());
    }

    #[test]
    fn test_framework_paths() {
        let workspace = BuildWorkspace::create().unwrap();
        let slot = workspace.binary_slot("GoogleMaps");
        assert!(slot.ends_with("content/Frameworks/GoogleMaps.framework/Versions/A/GoogleMaps"));
    }

    #[test]
    fn test_linked_outputs_are_distinct_per_arch() {
        let workspace = BuildWorkspace::create().unwrap();
        let a = workspace.linked_output("Pkg", Arch::X86_64);
        let b = workspace.linked_output("Pkg", Arch::Arm64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_drop_removes_workspace() {
        let workspace = BuildWorkspace::create().unwrap();
        let path = workspace.path().to_path_buf();
        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn test_keep_leaks_workspace() {
        let workspace = BuildWorkspace::create().unwrap();
        let path = workspace.keep();
        assert!(path.exists());
        fs::remove_dir_all(&path).unwrap();
    }
}
