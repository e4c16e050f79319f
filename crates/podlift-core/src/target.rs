//! Target architectures and platform classification.
//!
//! The universal binary carries one slice per [`Arch`]. Each
//! architecture maps deterministically to a [`Platform`], which in
//! turn selects the SDK root and the minimum-OS-version linker flag.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an architecture name is not recognized.
#[derive(Error, Debug)]
#[error("unknown architecture: {0}")]
pub struct ParseArchError(String);

/// A CPU architecture slice of the universal binary.
///
/// The declaration order is the canonical build and merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 64-bit simulator slice
    X86_64,
    /// 32-bit simulator slice
    I386,
    /// 32-bit device slice
    Armv7,
    /// 32-bit device slice (A6)
    Armv7s,
    /// 64-bit device slice
    Arm64,
}

impl Arch {
    /// All supported architectures, in canonical order.
    pub const ALL: [Arch; 5] = [
        Arch::X86_64,
        Arch::I386,
        Arch::Armv7,
        Arch::Armv7s,
        Arch::Arm64,
    ];

    /// The name `libtool -arch_only` expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::I386 => "i386",
            Self::Armv7 => "armv7",
            Self::Armv7s => "armv7s",
            Self::Arm64 => "arm64",
        }
    }

    /// Classify the architecture by the platform it runs on.
    pub fn platform(self) -> Platform {
        match self {
            Self::X86_64 | Self::I386 => Platform::Simulator,
            Self::Armv7 | Self::Armv7s | Self::Arm64 => Platform::Ios,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Arch {
    type Err = ParseArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" => Ok(Self::X86_64),
            "i386" => Ok(Self::I386),
            "armv7" => Ok(Self::Armv7),
            "armv7s" => Ok(Self::Armv7s),
            "arm64" => Ok(Self::Arm64),
            _ => Err(ParseArchError(s.to_string())),
        }
    }
}

/// The platform category an architecture links against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// The iOS simulator SDK (x86 slices).
    Simulator,
    /// The iOS device SDK (ARM slices).
    Ios,
}

impl Platform {
    /// Display name used in status output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulator => "Simulator",
            Self::Ios => "iOS",
        }
    }

    /// The minimum-OS-version flag `libtool` expects for this platform.
    pub fn version_min_flag(self) -> &'static str {
        match self {
            Self::Simulator => "-ios_simulator_version_min",
            Self::Ios => "-ios_version_min",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
