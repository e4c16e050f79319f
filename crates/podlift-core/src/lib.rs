//! Core library for podlift.
//!
//! Rebuilds a CocoaPods static framework as a universal dynamic
//! framework. The pipeline is strictly linear:
//!
//! 1. [`podspec`] resolves the pod's metadata via the CocoaPods CLI.
//! 2. [`fetch`] downloads the source archive; [`extract`] unpacks it
//!    into a [`workspace::BuildWorkspace`].
//! 3. [`linker`] produces one dynamic library per target
//!    architecture with `libtool`.
//! 4. [`lipo`] merges the per-architecture outputs into a single
//!    universal binary.
//! 5. [`bundle`] installs the framework metadata, swaps in the
//!    merged binary, and re-archives the result.
//!
//! Every stage is fallible and nothing is retried: the first failure
//! propagates to the caller and aborts the run.

pub mod bundle;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod linker;
pub mod lipo;
pub mod podspec;
pub mod target;
pub mod workspace;

pub use config::ToolchainConfig;
pub use podspec::PodSpec;
pub use target::{Arch, Platform};
pub use workspace::BuildWorkspace;

/// Final path segment of a URL, used to name the produced archive
/// after the original source archive.
pub fn filename_from_url(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://dl.google.com/maps/GoogleMaps-1.10.4.tar.gz"),
            "GoogleMaps-1.10.4.tar.gz"
        );
        assert_eq!(filename_from_url("https://x/y/Pkg-1.0.tar.gz"), "Pkg-1.0.tar.gz");
        assert_eq!(filename_from_url("file.tar.gz"), "file.tar.gz");
    }
}
