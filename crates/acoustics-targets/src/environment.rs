//! Target environment model.
//!
//! The environment is supplied once per build invocation and is read-only to
//! the module rules; every field is plain data so resolution stays a pure
//! function of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TargetError;
use crate::platform::Platform;
use crate::version::HostVersion;

/// Build configuration requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildConfiguration {
    Debug,
    Release,
}

impl BuildConfiguration {
    /// Folder name used for artifacts of this configuration.
    pub fn folder(self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "Debug",
            BuildConfiguration::Release => "Release",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder())
    }
}

impl FromStr for BuildConfiguration {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err(TargetError::UnknownConfiguration(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for BuildConfiguration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// How the host links modules into the final binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LinkType {
    /// One shared library per module.
    #[default]
    Modular,
    /// Everything linked into a single executable.
    Monolithic,
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkType::Modular => write!(f, "Modular"),
            LinkType::Monolithic => write!(f, "Monolithic"),
        }
    }
}

impl FromStr for LinkType {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modular" => Ok(Self::Modular),
            "monolithic" => Ok(Self::Monolithic),
            _ => Err(TargetError::UnknownLinkType(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for LinkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// Everything the module rules need to know about the build being performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetEnvironment {
    /// Environment name (e.g., "win64-development").
    #[serde(default)]
    pub name: String,
    pub platform: Platform,
    pub configuration: BuildConfiguration,
    /// Debug builds link debug artifacts only when this is also set.
    #[serde(default)]
    pub debug_crt_opt_in: bool,
    pub host_version: HostVersion,
    #[serde(default)]
    pub link_type: LinkType,
    #[serde(default)]
    pub use_static_crt: bool,
    /// Visual Studio compiler version name (e.g., "2017").
    #[serde(default)]
    pub compiler_version: Option<String>,
}

impl TargetEnvironment {
    /// Construct an environment with default link settings.
    pub fn new(
        name: impl Into<String>,
        platform: Platform,
        configuration: BuildConfiguration,
        host_version: HostVersion,
    ) -> Self {
        Self {
            name: name.into(),
            platform,
            configuration,
            debug_crt_opt_in: false,
            host_version,
            link_type: LinkType::Modular,
            use_static_crt: false,
            compiler_version: None,
        }
    }

    /// Configuration whose artifacts should actually be linked.
    ///
    /// Release unless Debug is requested *and* the host opted into the debug
    /// CRT; this keeps debug-symbol builds on release binaries by default.
    pub fn artifact_configuration(&self) -> BuildConfiguration {
        if self.configuration == BuildConfiguration::Debug && self.debug_crt_opt_in {
            BuildConfiguration::Debug
        } else {
            BuildConfiguration::Release
        }
    }

    /// Windows 64-bit editor build against engine 4.22.
    pub fn win64_development() -> Self {
        let mut env = Self::new(
            "win64-development",
            Platform::Win64,
            BuildConfiguration::Release,
            HostVersion::new(4, 22, 0),
        );
        env.compiler_version = Some("2017".into());
        env
    }

    /// Windows 64-bit debug build linking the debug CRT.
    pub fn win64_debug() -> Self {
        let mut env = Self::win64_development();
        env.name = "win64-debug".into();
        env.configuration = BuildConfiguration::Debug;
        env.debug_crt_opt_in = true;
        env
    }

    /// Windows 32-bit release build.
    pub fn win32_release() -> Self {
        let mut env = Self::new(
            "win32-release",
            Platform::Win32,
            BuildConfiguration::Release,
            HostVersion::new(4, 22, 0),
        );
        env.compiler_version = Some("2017".into());
        env
    }

    /// Android armeabi-v7a build.
    pub fn android_release() -> Self {
        Self::new(
            "android-release",
            Platform::Android,
            BuildConfiguration::Release,
            HostVersion::new(4, 22, 0),
        )
    }

    /// Xbox One monolithic release build.
    pub fn xbox_one_release() -> Self {
        let mut env = Self::new(
            "xboxone-release",
            Platform::XboxOne,
            BuildConfiguration::Release,
            HostVersion::new(4, 22, 0),
        );
        env.link_type = LinkType::Monolithic;
        env
    }
}
