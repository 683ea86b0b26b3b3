//! Error types for target environment operations.

use std::path::PathBuf;

/// Errors that can occur while parsing or loading target environments.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing target files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Target file not found.
    #[error("target file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A platform token that names no known engine platform.
    #[error("unknown platform '{0}'")]
    UnknownPlatform(String),

    /// A configuration token other than Debug or Release.
    #[error("unknown build configuration '{0}' (expected Debug or Release)")]
    UnknownConfiguration(String),

    /// A link type token other than Modular or Monolithic.
    #[error("unknown link type '{0}' (expected Modular or Monolithic)")]
    UnknownLinkType(String),

    /// Host version token that is not `MAJOR.MINOR[.PATCH]`.
    #[error("invalid host version '{token}': {source}")]
    InvalidHostVersion {
        /// The token as given.
        token: String,
        /// Underlying semver error.
        source: semver::Error,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
