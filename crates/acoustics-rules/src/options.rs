//! Directory layout and feature options consumed by the resolvers.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the plugin's and the engine's third-party files live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginLayout {
    /// The plugin's `ThirdParty` root (headers and per-platform libraries).
    pub third_party_dir: PathBuf,
    /// The engine's third-party source root (hosts the FBX SDK).
    pub engine_third_party_dir: PathBuf,
}

impl PluginLayout {
    pub fn new(third_party_dir: impl Into<PathBuf>, engine_third_party_dir: impl Into<PathBuf>) -> Self {
        Self {
            third_party_dir: third_party_dir.into(),
            engine_third_party_dir: engine_third_party_dir.into(),
        }
    }

    /// Layout with both roots taken relative to `base` (absolute roots are
    /// kept as given), normalized lexically so `..` segments never reach
    /// artifact paths and the directories need not exist.
    pub fn relative_to(base: &Path, third_party_dir: &Path, engine_third_party_dir: &Path) -> Self {
        Self::new(
            normalize_lexically(&base.join(third_party_dir)),
            normalize_lexically(&base.join(engine_third_party_dir)),
        )
    }

    /// `<third_party_dir>/Include`.
    pub fn include_dir(&self) -> PathBuf {
        self.third_party_dir.join("Include")
    }
}

/// Resolver-build-time feature switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverOptions {
    /// Import collision geometry through the FBX SDK in the bake module.
    #[serde(default)]
    pub collision_support: bool,
    /// Build the runtime module unoptimized with default PCH handling.
    #[serde(default)]
    pub debugging: bool,
    /// Prepended to the simulation library stems (e.g., "Triton.").
    #[serde(default)]
    pub library_prefix: String,
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
