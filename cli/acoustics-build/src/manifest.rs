//! `acoustics.toml` project configuration and target lookup.

use std::path::{Path, PathBuf};

use acoustics_rules::{PluginLayout, ResolverOptions};
use acoustics_targets::parse::{load_environment_toml, TARGET_SUFFIX};
use acoustics_targets::TargetEnvironment;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the project configuration.
pub const MANIFEST_FILE: &str = "acoustics.toml";

/// Default third-party root, relative to the project directory.
const DEFAULT_THIRD_PARTY_DIR: &str = "ThirdParty";

/// Default engine third-party source root, relative to the project directory.
const DEFAULT_ENGINE_THIRD_PARTY_DIR: &str = "Engine/Source/ThirdParty";

/// Built-in environment used when neither the command line nor the manifest names one.
pub const FALLBACK_TARGET: &str = "win64-development";

/// The top-level configuration of a plugin project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AcousticsManifest {
    /// Plugin metadata (required).
    pub plugin: PluginConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Resolver feature switches.
    #[serde(default)]
    pub features: ResolverOptions,
    #[serde(default)]
    pub targets: Option<TargetsConfig>,
}

/// Plugin metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Directory layout section; relative paths are taken from the project directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutConfig {
    #[serde(default)]
    pub third_party_dir: Option<PathBuf>,
    #[serde(default)]
    pub engine_third_party_dir: Option<PathBuf>,
}

/// Targets section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetsConfig {
    /// Default target environment name.
    #[serde(default)]
    pub default: Option<String>,
}

impl AcousticsManifest {
    /// Search upward from `start_dir` for an `acoustics.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: AcousticsManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                tracing::debug!(path = %candidate.display(), "loaded project manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing acoustics.toml")
    }

    /// Default target name from the manifest.
    pub fn default_target(&self) -> Option<&str> {
        self.targets.as_ref().and_then(|t| t.default.as_deref())
    }

    /// Generate the default template for `acoustics-build init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[plugin]
name = "{name}"
version = "0.1.0"

[layout]
third-party-dir = "{DEFAULT_THIRD_PARTY_DIR}"
engine-third-party-dir = "{DEFAULT_ENGINE_THIRD_PARTY_DIR}"

[features]
collision-support = false
debugging = false
library-prefix = ""

[targets]
default = "{FALLBACK_TARGET}"
"#
        )
    }
}

/// Plugin layout for a project, using defaults when there is no manifest.
pub fn plugin_layout(manifest: Option<&AcousticsManifest>, project_dir: &Path) -> PluginLayout {
    let layout = manifest.map(|m| m.layout.clone()).unwrap_or_default();
    let third_party = layout
        .third_party_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_THIRD_PARTY_DIR));
    let engine = layout
        .engine_third_party_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ENGINE_THIRD_PARTY_DIR));
    PluginLayout::relative_to(project_dir, &third_party, &engine)
}

/// Look up a target by name: project `targets/<name>.target.toml` first, then built-ins.
pub fn resolve_target(name: &str, project_dir: Option<&Path>) -> Result<Option<TargetEnvironment>> {
    if let Some(dir) = project_dir {
        let path = dir.join("targets").join(format!("{name}{TARGET_SUFFIX}"));
        if path.is_file() {
            let env = load_environment_toml(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            return Ok(Some(env));
        }
    }
    Ok(builtin_target(name))
}

/// Built-in target environment by name.
pub fn builtin_target(name: &str) -> Option<TargetEnvironment> {
    match name {
        "win64-development" => Some(TargetEnvironment::win64_development()),
        "win64-debug" => Some(TargetEnvironment::win64_debug()),
        "win32-release" => Some(TargetEnvironment::win32_release()),
        "android-release" => Some(TargetEnvironment::android_release()),
        "xboxone-release" => Some(TargetEnvironment::xbox_one_release()),
        _ => None,
    }
}

/// List all built-in target names.
pub fn builtin_targets() -> Vec<(&'static str, &'static str)> {
    vec![
        ("win64-development", "Windows x64, Release artifacts, engine 4.22"),
        ("win64-debug", "Windows x64, Debug artifacts (debug CRT opt-in)"),
        ("win32-release", "Windows x86, Release artifacts"),
        ("android-release", "Android armeabi-v7a, single configuration"),
        ("xboxone-release", "Xbox One, monolithic Release"),
    ]
}
