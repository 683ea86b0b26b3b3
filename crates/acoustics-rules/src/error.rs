//! Module resolution error types.

use std::path::PathBuf;

use acoustics_targets::{HostVersion, Platform};

/// Errors that can occur while resolving or checking module descriptors.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// No prebuilt binaries exist for the platform.
    #[error("module '{module}' does not support platform {platform}")]
    UnsupportedPlatform {
        platform: Platform,
        module: &'static str,
    },

    /// The host engine is older than any version the rules can gate on.
    #[error("unsupported host version {version} (minimum {minimum})")]
    UnsupportedHostVersion {
        version: HostVersion,
        minimum: HostVersion,
    },

    /// Collision support on Windows needs the compiler version to find the FBX SDK.
    #[error("collision support on {platform} requires a compiler version to locate the FBX SDK")]
    MissingCompilerVersion { platform: Platform },

    /// A prebuilt file is absent on disk.
    #[error("module '{module}': artifact not found: {}", path.display())]
    ArtifactMissing { module: String, path: PathBuf },

    /// A module name other than the runtime or editor module.
    #[error("unknown module '{0}' (expected runtime or editor)")]
    UnknownModule(String),
}

/// Result type alias for module resolution.
pub type Result<T> = std::result::Result<T, RulesError>;
