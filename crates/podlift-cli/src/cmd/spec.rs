//! Spec command - resolve and print a pod's link metadata.

use anyhow::{Context, Result};
use podlift_core::podspec;

/// Resolve a pod and print its archive URL and link sets.
pub async fn spec(pod: &str, json: bool) -> Result<()> {
    let spec = podspec::resolve(pod)
        .await
        .with_context(|| format!("Failed to resolve podspec for {pod}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&spec)?);
    } else {
        println!("{}", spec.name);
        println!("  source:     {}", spec.archive_url);
        println!("  frameworks: {}", spec.frameworks.join(", "));
        println!("  libraries:  {}", spec.libraries.join(", "));
    }

    Ok(())
}
