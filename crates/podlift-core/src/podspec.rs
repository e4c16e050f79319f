//! CocoaPods metadata resolution.
//!
//! Runs `pod spec cat <name>` and reduces the JSON podspec to the
//! three fields the pipeline needs: the source archive URL and the
//! framework/library link sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::Command;

/// Library names linked into every build regardless of podspec
/// content: the Objective-C runtime and the base system library.
const IMPLICIT_LIBRARIES: [&str; 2] = ["objc", "System"];

/// Errors raised while resolving a pod's metadata.
#[derive(Error, Debug)]
pub enum PodspecError {
    /// The CocoaPods CLI is not on PATH.
    #[error("CocoaPods CLI not found: {0}")]
    ToolMissing(#[from] which::Error),

    /// The CocoaPods CLI could not be spawned.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `pod spec cat` exited non-zero (unknown pod, broken install).
    #[error("`pod spec cat {name}` failed: {stderr}")]
    SpecCat {
        /// The pod that was queried.
        name: String,
        /// The tool's diagnostic output.
        stderr: String,
    },

    /// The podspec JSON is malformed or missing required fields.
    #[error("invalid podspec: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawSource {
    http: String,
}

#[derive(Debug, Deserialize)]
struct RawPodspec {
    source: RawSource,
    frameworks: Vec<String>,
    libraries: Vec<String>,
}

/// A pod's resolved link metadata. Built once, immutable afterward.
#[derive(Debug, Clone, Serialize)]
pub struct PodSpec {
    /// The pod name as published in the registry.
    pub name: String,
    /// URL of the pod's source archive.
    pub archive_url: String,
    /// Frameworks to link, sorted and deduplicated.
    pub frameworks: Vec<String>,
    /// Libraries to link, sorted and deduplicated, always including
    /// `objc` and `System`.
    pub libraries: Vec<String>,
}

/// Reduce a podspec JSON document to a [`PodSpec`].
///
/// Sorting the link sets here makes every downstream linker
/// invocation reproducible across runs.
pub fn parse_podspec(name: &str, json: &str) -> Result<PodSpec, PodspecError> {
    let raw: RawPodspec = serde_json::from_str(json)?;

    let frameworks: BTreeSet<String> = raw.frameworks.into_iter().collect();
    let mut libraries: BTreeSet<String> = raw.libraries.into_iter().collect();
    libraries.extend(IMPLICIT_LIBRARIES.iter().map(ToString::to_string));

    Ok(PodSpec {
        name: name.to_string(),
        archive_url: raw.source.http,
        frameworks: frameworks.into_iter().collect(),
        libraries: libraries.into_iter().collect(),
    })
}

/// Query the registry for a pod and resolve its link metadata.
pub async fn resolve(name: &str) -> Result<PodSpec, PodspecError> {
    let pod = which::which("pod")?;

    let output = Command::new(pod)
        .args(["spec", "cat", name])
        .output()
        .await?;

    if !output.status.success() {
        return Err(PodspecError::SpecCat {
            name: name.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    parse_podspec(name, &String::from_utf8_lossy(&output.stdout))
}
