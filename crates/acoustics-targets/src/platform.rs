//! Engine platforms and their prebuilt-binary folder names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TargetError;

/// An engine target platform.
///
/// Only some platforms have prebuilt acoustics binaries; see
/// [`Platform::arch_folder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Platform {
    Win32,
    Win64,
    /// 32-bit ARM Android (armeabi-v7a).
    Android,
    XboxOne,
    Mac,
    Linux,
    #[serde(rename = "IOS")]
    Ios,
    #[serde(rename = "PS4")]
    Ps4,
    Switch,
}

impl Platform {
    /// Every platform the engine can target, in declaration order.
    pub const ALL: [Platform; 9] = [
        Platform::Win32,
        Platform::Win64,
        Platform::Android,
        Platform::XboxOne,
        Platform::Mac,
        Platform::Linux,
        Platform::Ios,
        Platform::Ps4,
        Platform::Switch,
    ];

    /// Canonical engine name of the platform.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Win32 => "Win32",
            Platform::Win64 => "Win64",
            Platform::Android => "Android",
            Platform::XboxOne => "XboxOne",
            Platform::Mac => "Mac",
            Platform::Linux => "Linux",
            Platform::Ios => "IOS",
            Platform::Ps4 => "PS4",
            Platform::Switch => "Switch",
        }
    }

    /// Folder under the plugin's third-party root holding this platform's
    /// prebuilt libraries, or `None` when no binaries ship for it.
    pub fn arch_folder(self) -> Option<&'static str> {
        match self {
            Platform::Win32 => Some("Win32"),
            Platform::Win64 => Some("Win64"),
            Platform::Android => Some("Android_armeabi-v7a"),
            Platform::XboxOne => Some("XboxOne"),
            Platform::Mac | Platform::Linux | Platform::Ios | Platform::Ps4 | Platform::Switch => {
                None
            }
        }
    }

    /// Whether prebuilt acoustics binaries exist for this platform.
    pub fn is_supported(self) -> bool {
        self.arch_folder().is_some()
    }

    /// Whether the platform ships a single artifact configuration (no
    /// Debug/Release split).
    pub fn has_single_configuration(self) -> bool {
        matches!(self, Platform::Android)
    }

    /// Platforms with prebuilt binaries.
    pub fn supported() -> impl Iterator<Item = Platform> {
        Self::ALL.into_iter().filter(|p| p.is_supported())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TargetError::UnknownPlatform(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
