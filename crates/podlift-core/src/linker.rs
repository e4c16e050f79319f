//! Per-architecture dynamic linking.
//!
//! Drives `libtool -dynamic` once per target architecture, turning
//! the framework's static archive into an architecture-restricted
//! dynamic library. Argument construction is a pure function so the
//! exact invocations are testable without a toolchain.

use std::path::Path;

use thiserror::Error;
use tokio::process::Command;

use crate::config::{ConfigError, ToolchainConfig};
use crate::target::{Arch, Platform};

/// Errors raised while linking one architecture.
#[derive(Error, Debug)]
pub enum LinkError {
    /// No SDK root configured for the architecture's platform.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `libtool` could not be spawned.
    #[error("failed to run libtool: {0}")]
    Io(#[from] std::io::Error),

    /// `libtool` exited non-zero.
    #[error("libtool failed for {arch}: {stderr}")]
    Libtool {
        /// The architecture being linked.
        arch: Arch,
        /// The tool's diagnostic output.
        stderr: String,
    },
}

/// Inputs shared by every per-architecture link of one run.
#[derive(Debug, Clone, Copy)]
pub struct LinkRequest<'a> {
    /// The framework's existing static binary, passed to `libtool`
    /// as the archive being relinked.
    pub static_archive: &'a Path,
    /// Frameworks to link, in sorted order.
    pub frameworks: &'a [String],
    /// Libraries to link, in sorted order.
    pub libraries: &'a [String],
    /// SDK roots and minimum OS version.
    pub config: &'a ToolchainConfig,
}

/// Build the full `libtool` argv for one architecture.
///
/// The `-syslibroot` override is emitted for simulator targets only;
/// device targets link against the SDK search paths alone.
pub fn libtool_args(
    arch: Arch,
    request: &LinkRequest<'_>,
    output: &Path,
) -> Result<Vec<String>, ConfigError> {
    let platform = arch.platform();
    let sdk = request.config.sdk_root(platform)?.display().to_string();

    let mut args: Vec<String> = vec![
        "-dynamic".into(),
        request.static_archive.display().to_string(),
        "-weak_framework".into(),
        "UIKit".into(),
        "-weak_framework".into(),
        "Foundation".into(),
        "-ObjC".into(),
    ];

    for framework in request.frameworks {
        args.push("-framework".into());
        args.push(framework.clone());
    }

    if platform == Platform::Simulator {
        args.push("-syslibroot".into());
        args.push(sdk.clone());
    }

    args.push("-o".into());
    args.push(output.display().to_string());
    args.push(format!("-F{sdk}/System/Library/Frameworks/"));
    args.push(format!("-L{sdk}/usr/lib/"));
    args.push("-arch_only".into());
    args.push(arch.as_str().into());
    args.push(platform.version_min_flag().into());
    args.push(request.config.min_os_version.clone());

    for library in request.libraries {
        args.push(format!("-l{library}"));
    }

    Ok(args)
}

/// Run `libtool` with a previously built argv.
///
/// Diagnostic output is surfaced, never parsed: warnings are logged,
/// a non-zero exit carries stderr in the error.
pub async fn run_libtool(arch: Arch, args: &[String]) -> Result<(), LinkError> {
    tracing::debug!(arch = %arch, "libtool {}", args.join(" "));

    let output = Command::new("libtool").args(args).output().await?;

    if !output.status.success() {
        return Err(LinkError::Libtool {
            arch,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    if !output.stderr.is_empty() {
        tracing::warn!(arch = %arch, "libtool: {}", String::from_utf8_lossy(&output.stderr));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_config() -> ToolchainConfig {
        ToolchainConfig::from_str(
            r#"
            [sdk_roots]
            ios = "/sdk/ios"
            simulator = "/sdk/sim"
            "#,
        )
        .unwrap()
    }

    fn sample_request<'a>(config: &'a ToolchainConfig, static_archive: &'a Path) -> LinkRequest<'a> {
        LinkRequest {
            static_archive,
            frameworks: &[],
            libraries: &[],
            config,
        }
    }

    #[test]
    fn test_golden_argv_for_device_target() {
        let config = sample_config();
        let frameworks = vec!["CoreData".to_string(), "CoreLocation".to_string()];
        let libraries = vec!["System".to_string(), "objc".to_string(), "z".to_string()];
        let request = LinkRequest {
            static_archive: Path::new("/ws/content/Frameworks/Pkg.framework/Versions/A/Pkg"),
            frameworks: &frameworks,
            libraries: &libraries,
            config: &config,
        };

        let args = libtool_args(Arch::Arm64, &request, Path::new("/ws/outputs/Pkg-arm64.dylib"))
            .unwrap();

        assert_eq!(
            args,
            [
                "-dynamic",
                "/ws/content/Frameworks/Pkg.framework/Versions/A/Pkg",
                "-weak_framework",
                "UIKit",
                "-weak_framework",
                "Foundation",
                "-ObjC",
                "-framework",
                "CoreData",
                "-framework",
                "CoreLocation",
                "-o",
                "/ws/outputs/Pkg-arm64.dylib",
                "-F/sdk/ios/System/Library/Frameworks/",
                "-L/sdk/ios/usr/lib/",
                "-arch_only",
                "arm64",
                "-ios_version_min",
                "8.0",
                "-lSystem",
                "-lobjc",
                "-lz",
            ]
        );
    }

    #[test]
    fn test_syslibroot_present_iff_simulator() {
        let config = sample_config();
        let archive = PathBuf::from("/ws/in");
        let request = sample_request(&config, &archive);
        let out = PathBuf::from("/ws/out.dylib");

        for arch in Arch::ALL {
            let args = libtool_args(arch, &request, &out).unwrap();
            let has_syslibroot = args.iter().any(|a| a == "-syslibroot");
            assert_eq!(
                has_syslibroot,
                arch.platform() == Platform::Simulator,
                "unexpected syslibroot presence for {arch}"
            );
        }
    }

    #[test]
    fn test_simulator_target_uses_simulator_sdk_and_flag() {
        let config = sample_config();
        let archive = PathBuf::from("/ws/in");
        let request = sample_request(&config, &archive);

        let args =
            libtool_args(Arch::X86_64, &request, Path::new("/ws/out.dylib")).unwrap();

        let syslibroot_at = args.iter().position(|a| a == "-syslibroot").unwrap();
        assert_eq!(args[syslibroot_at + 1], "/sdk/sim");
        assert!(args.contains(&"-F/sdk/sim/System/Library/Frameworks/".to_string()));
        assert!(args.contains(&"-ios_simulator_version_min".to_string()));
        assert!(!args.contains(&"-ios_version_min".to_string()));
    }

    #[test]
    fn test_min_os_version_follows_config() {
        let mut config = sample_config();
        config.min_os_version = "9.0".to_string();
        let archive = PathBuf::from("/ws/in");
        let request = sample_request(&config, &archive);

        let args = libtool_args(Arch::Armv7, &request, Path::new("/ws/out.dylib")).unwrap();
        let flag_at = args.iter().position(|a| a == "-ios_version_min").unwrap();
        assert_eq!(args[flag_at + 1], "9.0");
    }

    #[test]
    fn test_missing_sdk_root_is_an_error() {
        let config = ToolchainConfig::from_str(
            r#"
            [sdk_roots]
            ios = "/sdk/ios"
            "#,
        )
        .unwrap();
        let archive = PathBuf::from("/ws/in");
        let request = sample_request(&config, &archive);

        assert!(libtool_args(Arch::I386, &request, Path::new("/ws/out.dylib")).is_err());
    }
}
