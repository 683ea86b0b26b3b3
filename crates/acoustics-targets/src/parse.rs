//! TOML parsing, serialization, validation, and discovery for target environments.
//!
//! Named environments are stored as `.target.toml` files in the `targets/`
//! directory of a plugin project. This module provides functions to load,
//! validate, serialize, and discover these files.

use std::path::{Path, PathBuf};

use crate::environment::{BuildConfiguration, TargetEnvironment};
use crate::error::{Result, TargetError};
use crate::platform::Platform;
use crate::version::HostVersion;

/// File suffix of target environment definitions.
pub const TARGET_SUFFIX: &str = ".target.toml";

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A validation issue found in a target environment.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// Load an environment from a `.target.toml` file.
pub fn load_environment_toml(path: &Path) -> Result<TargetEnvironment> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let mut env = parse_environment_toml(&content)?;
    if env.name.is_empty() {
        if let Some(stem) = target_name(path) {
            env.name = stem;
        }
    }
    tracing::debug!(path = %path.display(), name = %env.name, "loaded target environment");
    Ok(env)
}

/// Parse an environment from a TOML string.
pub fn parse_environment_toml(toml_str: &str) -> Result<TargetEnvironment> {
    let env: TargetEnvironment = toml::from_str(toml_str)?;
    Ok(env)
}

/// Serialize an environment to pretty TOML.
pub fn environment_to_toml(env: &TargetEnvironment) -> Result<String> {
    let toml_str = toml::to_string_pretty(env)?;
    Ok(toml_str)
}

/// Validate an environment before handing it to the module rules.
///
/// Returns `Ok(())` if there is nothing to report, or `Err(issues)` with
/// every problem found. Issues may be warnings only; callers decide whether
/// warnings block.
pub fn validate_environment(env: &TargetEnvironment) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if !env.platform.is_supported() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            message: format!(
                "platform '{}' has no prebuilt acoustics binaries (supported: {})",
                env.platform,
                Platform::supported()
                    .map(|p| p.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
    }

    if !env.host_version.is_supported() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            message: format!(
                "host version {} is older than the minimum supported {}",
                env.host_version,
                HostVersion::MIN_SUPPORTED
            ),
        });
    }

    if env.debug_crt_opt_in && env.configuration == BuildConfiguration::Release {
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            message: "debug-crt-opt-in has no effect on a Release configuration".into(),
        });
    }

    if env.platform == Platform::Win64 && env.compiler_version.is_none() {
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            message: "Win64 environment has no compiler-version; collision support cannot locate the FBX SDK"
                .into(),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Generate a template `.target.toml` for a new environment.
///
/// Seeds from the Win64 development environment with the given name and platform.
pub fn generate_template(name: &str, platform: Platform) -> Result<String> {
    let mut env = TargetEnvironment::win64_development();
    env.name = name.into();
    env.platform = platform;
    if platform != Platform::Win64 && platform != Platform::Win32 {
        env.compiler_version = None;
    }
    environment_to_toml(&env)
}

/// Discover all `.target.toml` files in a project's `targets/` directory.
///
/// Returns a list of (target_name, file_path) pairs sorted by name.
pub fn discover_targets(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let targets_dir = project_dir.join("targets");
    if !targets_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut targets = Vec::new();
    for entry in std::fs::read_dir(&targets_dir)? {
        let path = entry?.path();
        if let Some(name) = target_name(&path) {
            targets.push((name, path));
        }
    }
    targets.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(targets)
}

fn target_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(TARGET_SUFFIX))
        .map(str::to_string)
}
