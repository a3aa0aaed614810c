//! Host platform identification.

use crate::error::{ReleaseError, ReleaseResult};
use serde::{Deserialize, Serialize};
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Target platform a release is built for.
///
/// Anything outside this enumeration is unsupported; detection fails before
/// any pipeline step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    Macos,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Platform {
    /// All platforms a release is built for.
    pub fn all() -> &'static [Platform] {
        &[Self::Windows, Self::Linux, Self::Macos]
    }

    /// Identify the platform from an OS name as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> ReleaseResult<Self> {
        match os {
            "windows" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::Macos),
            other => Err(ReleaseError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Identify the platform of the running host.
    ///
    /// This is the only place the host environment is consulted; everything
    /// downstream takes the platform as an explicit parameter.
    pub fn detect() -> ReleaseResult<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Canonical platform name used in asset file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Macos => "macos",
        }
    }

    /// Executable suffix for this platform.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            Self::Linux | Self::Macos => "",
        }
    }

    /// File name of the bundled prebuilt binary for this platform.
    pub fn asset_name(&self) -> String {
        format!("ppx-{}{}", self.name(), self.exe_suffix())
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
