//! Host engine version tokens.
//!
//! Wraps the `semver` crate so engine-style tokens like `4.22` compare
//! correctly against the dependency gates used by the module rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// Version of the host engine a module is being built against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HostVersion(semver::Version);

impl HostVersion {
    /// Oldest engine the plugin's module rules understand.
    pub const MIN_SUPPORTED: HostVersion = HostVersion::new(4, 0, 0);

    /// Construct from explicit components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parse `MAJOR`, `MAJOR.MINOR` or `MAJOR.MINOR.PATCH`.
    pub fn parse(token: &str) -> Result<Self, TargetError> {
        let trimmed = token.trim();
        let normalized = match trimmed.matches('.').count() {
            0 => format!("{trimmed}.0.0"),
            1 => format!("{trimmed}.0"),
            _ => trimmed.to_string(),
        };
        semver::Version::parse(&normalized)
            .map(Self)
            .map_err(|source| TargetError::InvalidHostVersion {
                token: token.to_string(),
                source,
            })
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    /// Whether this version is `major.minor` or later.
    pub fn at_least(&self, major: u64, minor: u64) -> bool {
        (self.0.major, self.0.minor) >= (major, minor)
    }

    /// Whether the module rules know how to gate dependencies for this version.
    pub fn is_supported(&self) -> bool {
        *self >= Self::MIN_SUPPORTED
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.patch == 0 && self.0.pre.is_empty() && self.0.build.is_empty() {
            write!(f, "{}.{}", self.0.major, self.0.minor)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for HostVersion {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HostVersion {
    type Error = TargetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HostVersion> for String {
    fn from(value: HostVersion) -> Self {
        value.to_string()
    }
}
