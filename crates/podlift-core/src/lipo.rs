//! Universal binary assembly.
//!
//! One `lipo -create` invocation merges the per-architecture dylibs
//! into a single fat binary. The input set must be complete: a
//! partial set is rejected before the tool is ever spawned.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::process::Command;

/// Errors raised while merging the per-architecture outputs.
#[derive(Error, Debug)]
pub enum LipoError {
    /// Fewer (or more) linked inputs than configured architectures.
    #[error("expected {expected} linked inputs, got {actual}")]
    IncompleteInputs {
        /// Number of configured architectures.
        expected: usize,
        /// Number of inputs supplied.
        actual: usize,
    },

    /// `lipo` could not be spawned.
    #[error("failed to run lipo: {0}")]
    Io(#[from] std::io::Error),

    /// `lipo` exited non-zero.
    #[error("lipo failed: {stderr}")]
    Lipo {
        /// The tool's diagnostic output.
        stderr: String,
    },
}

/// Build the `lipo` argv, validating that every configured
/// architecture contributed an input. Input order is preserved, so
/// the merged output is deterministic for a fixed configuration.
pub fn lipo_args(
    output: &Path,
    inputs: &[PathBuf],
    expected: usize,
) -> Result<Vec<String>, LipoError> {
    if inputs.is_empty() || inputs.len() != expected {
        return Err(LipoError::IncompleteInputs {
            expected,
            actual: inputs.len(),
        });
    }

    let mut args: Vec<String> = vec![
        "-output".into(),
        output.display().to_string(),
        "-create".into(),
    ];
    args.extend(inputs.iter().map(|input| input.display().to_string()));

    Ok(args)
}

/// Run `lipo` with a previously built argv.
pub async fn run_lipo(args: &[String]) -> Result<(), LipoError> {
    tracing::debug!("lipo {}", args.join(" "));

    let output = Command::new("lipo").args(args).output().await?;

    if !output.status.success() {
        return Err(LipoError::Lipo {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}
