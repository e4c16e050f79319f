//! Toolchain configuration.
//!
//! SDK roots, the minimum OS version, and the architecture list are
//! configuration inputs with defaults matching the stock Xcode
//! layout. A TOML file can override any of them:
//!
//! ```toml
//! min_os_version = "9.0"
//! archs = ["x86_64", "arm64"]
//!
//! [sdk_roots]
//! ios = "/custom/iPhoneOS.sdk"
//! simulator = "/custom/iPhoneSimulator.sdk"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::target::{Arch, Platform};

/// Errors raised while loading or consulting the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// No SDK root is configured for the given platform.
    #[error("no SDK root configured for platform {0}")]
    MissingSdkRoot(Platform),
}

const DEFAULT_MIN_OS: &str = "8.0";

const IOS_SDK: &str = "/Applications/Xcode.app/Contents/Developer/Platforms/\
                       iPhoneOS.platform/Developer/SDKs/iPhoneOS.sdk";
const SIMULATOR_SDK: &str = "/Applications/Xcode.app/Contents/Developer/Platforms/\
                             iPhoneSimulator.platform/Developer/SDKs/iPhoneSimulator.sdk";

/// Link-time toolchain settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolchainConfig {
    /// SDK root per platform category.
    #[serde(default = "default_sdk_roots")]
    pub sdk_roots: BTreeMap<Platform, PathBuf>,

    /// Minimum OS version passed to every link invocation.
    #[serde(default = "default_min_os")]
    pub min_os_version: String,

    /// Architectures to build, in merge order.
    #[serde(default = "default_archs")]
    pub archs: Vec<Arch>,
}

fn default_sdk_roots() -> BTreeMap<Platform, PathBuf> {
    BTreeMap::from([
        (Platform::Ios, PathBuf::from(IOS_SDK)),
        (Platform::Simulator, PathBuf::from(SIMULATOR_SDK)),
    ])
}

fn default_min_os() -> String {
    DEFAULT_MIN_OS.to_string()
}

fn default_archs() -> Vec<Arch> {
    Arch::ALL.to_vec()
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            sdk_roots: default_sdk_roots(),
            min_os_version: default_min_os(),
            archs: default_archs(),
        }
    }
}

impl ToolchainConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// SDK root for the given platform.
    pub fn sdk_root(&self, platform: Platform) -> Result<&Path, ConfigError> {
        self.sdk_roots
            .get(&platform)
            .map(PathBuf::as_path)
            .ok_or(ConfigError::MissingSdkRoot(platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolchainConfig::default();
        assert_eq!(config.min_os_version, "8.0");
        assert_eq!(config.archs, Arch::ALL.to_vec());
        assert!(config.sdk_root(Platform::Ios).unwrap().ends_with("iPhoneOS.sdk"));
        assert!(
            config
                .sdk_root(Platform::Simulator)
                .unwrap()
                .ends_with("iPhoneSimulator.sdk")
        );
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = ToolchainConfig::from_str("min_os_version = \"9.0\"\n").unwrap();
        assert_eq!(config.min_os_version, "9.0");
        assert_eq!(config.archs, Arch::ALL.to_vec());
        assert!(config.sdk_root(Platform::Ios).is_ok());
    }

    #[test]
    fn test_full_override() {
        let toml = r#"
            min_os_version = "10.0"
            archs = ["x86_64", "arm64"]

            [sdk_roots]
            ios = "/sdk/ios"
            simulator = "/sdk/sim"
        "#;
        let config = ToolchainConfig::from_str(toml).unwrap();
        assert_eq!(config.archs, vec![Arch::X86_64, Arch::Arm64]);
        assert_eq!(config.sdk_root(Platform::Ios).unwrap(), Path::new("/sdk/ios"));
        assert_eq!(
            config.sdk_root(Platform::Simulator).unwrap(),
            Path::new("/sdk/sim")
        );
    }

    #[test]
    fn test_missing_sdk_root_is_an_error() {
        let toml = r#"
            [sdk_roots]
            ios = "/sdk/ios"
        "#;
        let config = ToolchainConfig::from_str(toml).unwrap();
        assert!(matches!(
            config.sdk_root(Platform::Simulator),
            Err(ConfigError::MissingSdkRoot(Platform::Simulator))
        ));
    }

    #[test]
    fn test_unknown_arch_is_rejected() {
        assert!(ToolchainConfig::from_str("archs = [\"mips\"]").is_err());
    }
}
