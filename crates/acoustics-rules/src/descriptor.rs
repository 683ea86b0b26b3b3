//! Module descriptor model and builder.
//!
//! A [`ModuleDescriptor`] is everything the host build system needs to
//! compile and link one module: include paths, dependency names, prebuilt
//! artifacts, and files staged next to the build output. Every list is an
//! [`OrderedSet`], so insertion order (include search order) is preserved and
//! duplicates are dropped at insertion time.
//!
//! # Example
//!
//! ```rust
//! use acoustics_rules::descriptor::{ArtifactKind, DescriptorBuilder};
//!
//! let mut builder = DescriptorBuilder::new("Example");
//! builder
//!     .public_dependency("Core")
//!     .public_dependency("Core")
//!     .artifact(ArtifactKind::Runtime, "ThirdParty/Win64/Release/Runtime.lib");
//! let descriptor = builder.build();
//! assert_eq!(descriptor.public_dependencies.len(), 1);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered list without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderedSet<T> {
    items: Vec<T>,
}

impl<T> OrderedSet<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> OrderedSet<T> {
    /// Append `item` unless an equal item is already present.
    ///
    /// Returns whether the item was inserted.
    pub fn insert(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Position of `item`, if present.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    /// Append every item of `other` not already present, keeping `other`'s order.
    pub fn extend_from(&mut self, other: OrderedSet<T>) {
        for item in other.items {
            self.insert(item);
        }
    }
}

impl OrderedSet<String> {
    /// Whether a string entry equal to `s` is present.
    pub fn contains_str(&self, s: &str) -> bool {
        self.items.iter().any(|i| i == s)
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for OrderedSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + PartialEq> Deserialize<'de> for OrderedSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(|items| items.into_iter().collect())
    }
}

/// Logical name of a prebuilt library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Acoustics simulation runtime.
    Runtime,
    /// Acoustic data codec.
    Codec,
    /// zlib, used by the codec.
    Compression,
    /// Bake-time preprocessor import library.
    Preprocessor,
    /// Autodesk FBX SDK, used by collision-mesh import.
    FbxSdk,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactKind::Runtime => "runtime",
            ArtifactKind::Codec => "codec",
            ArtifactKind::Compression => "compression",
            ArtifactKind::Preprocessor => "preprocessor",
            ArtifactKind::FbxSdk => "fbx-sdk",
        };
        f.write_str(s)
    }
}

/// A prebuilt library the module links against.
///
/// `path` is either a full path or a bare file name to be found in the
/// descriptor's public library paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactBinding {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// A file that must sit next to the build output at run time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuntimeDependency {
    /// Where the file is expected at run time (may contain build macros).
    pub path: PathBuf,
    /// File to copy into `path`, when it differs from `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

/// Precompiled header policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PchUsage {
    #[default]
    Default,
    UseExplicitOrSharedPchs,
}

/// When the host optimizes the module's code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeOptimization {
    #[default]
    Default,
    InShippingBuildsOnly,
}

/// Compiler settings for the module itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompileSettings {
    pub pch_usage: PchUsage,
    pub optimize_code: CodeOptimization,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_pch_header: Option<String>,
}

/// The computed build description of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleDescriptor {
    pub name: String,
    #[serde(default)]
    pub compile: CompileSettings,
    #[serde(default)]
    pub public_include_paths: OrderedSet<PathBuf>,
    #[serde(default)]
    pub private_include_paths: OrderedSet<PathBuf>,
    #[serde(default)]
    pub public_system_include_paths: OrderedSet<PathBuf>,
    #[serde(default)]
    pub public_dependencies: OrderedSet<String>,
    #[serde(default)]
    pub private_dependencies: OrderedSet<String>,
    /// Modules loaded at runtime; neither plugin module declares any.
    #[serde(default)]
    pub dynamically_loaded: OrderedSet<String>,
    #[serde(default)]
    pub public_definitions: OrderedSet<String>,
    #[serde(default)]
    pub public_library_paths: OrderedSet<PathBuf>,
    #[serde(default)]
    pub artifacts: OrderedSet<ArtifactBinding>,
    #[serde(default)]
    pub delay_load_dlls: OrderedSet<String>,
    #[serde(default)]
    pub runtime_dependencies: OrderedSet<RuntimeDependency>,
}

impl ModuleDescriptor {
    /// Fold `other` into this descriptor.
    ///
    /// Lists are appended with duplicates dropped. Name and compile settings
    /// of `self` are kept.
    pub fn merge(&mut self, other: ModuleDescriptor) {
        self.public_include_paths.extend_from(other.public_include_paths);
        self.private_include_paths.extend_from(other.private_include_paths);
        self.public_system_include_paths
            .extend_from(other.public_system_include_paths);
        self.public_dependencies.extend_from(other.public_dependencies);
        self.private_dependencies.extend_from(other.private_dependencies);
        self.dynamically_loaded.extend_from(other.dynamically_loaded);
        self.public_definitions.extend_from(other.public_definitions);
        self.public_library_paths.extend_from(other.public_library_paths);
        self.artifacts.extend_from(other.artifacts);
        self.delay_load_dlls.extend_from(other.delay_load_dlls);
        self.runtime_dependencies.extend_from(other.runtime_dependencies);
    }

    /// Artifact bound to `kind`, if any.
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&Path> {
        self.artifacts
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.path.as_path())
    }
}

/// Incremental construction of a [`ModuleDescriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    descriptor: ModuleDescriptor,
}

impl DescriptorBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            descriptor: ModuleDescriptor {
                name: name.into(),
                ..ModuleDescriptor::default()
            },
        }
    }

    pub fn compile(&mut self, settings: CompileSettings) -> &mut Self {
        self.descriptor.compile = settings;
        self
    }

    pub fn public_include(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.descriptor.public_include_paths.insert(path.into());
        self
    }

    pub fn private_include(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.descriptor.private_include_paths.insert(path.into());
        self
    }

    pub fn public_system_include(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.descriptor.public_system_include_paths.insert(path.into());
        self
    }

    pub fn public_dependency(&mut self, name: impl Into<String>) -> &mut Self {
        self.descriptor.public_dependencies.insert(name.into());
        self
    }

    pub fn private_dependency(&mut self, name: impl Into<String>) -> &mut Self {
        self.descriptor.private_dependencies.insert(name.into());
        self
    }

    pub fn definition(&mut self, definition: impl Into<String>) -> &mut Self {
        self.descriptor.public_definitions.insert(definition.into());
        self
    }

    pub fn library_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.descriptor.public_library_paths.insert(path.into());
        self
    }

    pub fn artifact(&mut self, kind: ArtifactKind, path: impl Into<PathBuf>) -> &mut Self {
        self.descriptor.artifacts.insert(ArtifactBinding {
            kind,
            path: path.into(),
        });
        self
    }

    pub fn delay_load_dll(&mut self, name: impl Into<String>) -> &mut Self {
        self.descriptor.delay_load_dlls.insert(name.into());
        self
    }

    pub fn runtime_dependency(
        &mut self,
        path: impl Into<PathBuf>,
        source: Option<PathBuf>,
    ) -> &mut Self {
        self.descriptor.runtime_dependencies.insert(RuntimeDependency {
            path: path.into(),
            source,
        });
        self
    }

    /// Merge an optional sub-descriptor (see [`ModuleDescriptor::merge`]).
    pub fn merge(&mut self, other: ModuleDescriptor) -> &mut Self {
        self.descriptor.merge(other);
        self
    }

    pub fn build(&self) -> ModuleDescriptor {
        self.descriptor.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_set_keeps_first_occurrence() {
        let set: OrderedSet<&str> = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(set.as_slice(), &["b", "a", "c"]);
    }

    #[test]
    fn ordered_set_insert_reports_duplicates() {
        let mut set = OrderedSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
        assert_eq!(set.position(&1), Some(0));
    }

    #[test]
    fn deserializing_drops_duplicates() {
        let set: OrderedSet<String> = serde_json::from_str(r#"["Core","Engine","Core"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains_str("Engine"));
    }

    #[test]
    fn merge_appends_without_duplicates() {
        let mut base = DescriptorBuilder::new("Base");
        base.public_dependency("Core")
            .private_include("Private")
            .compile(CompileSettings {
                pch_usage: PchUsage::UseExplicitOrSharedPchs,
                ..CompileSettings::default()
            });

        let mut extra = DescriptorBuilder::new("Extra");
        extra
            .public_dependency("Core")
            .public_dependency("Fbx")
            .definition("FBXSDK_SHARED")
            .runtime_dependency("out/a.dll", Some(PathBuf::from("lib/a.dll")));

        let merged = base.merge(extra.build()).build();
        assert_eq!(merged.name, "Base");
        assert_eq!(merged.compile.pch_usage, PchUsage::UseExplicitOrSharedPchs);
        assert_eq!(
            merged.public_dependencies.as_slice(),
            &["Core".to_string(), "Fbx".to_string()]
        );
        assert!(merged.public_definitions.contains_str("FBXSDK_SHARED"));
        assert_eq!(merged.runtime_dependencies.len(), 1);
    }

    #[test]
    fn artifact_lookup_by_kind() {
        let mut builder = DescriptorBuilder::new("M");
        builder
            .artifact(ArtifactKind::Runtime, "a/Runtime.lib")
            .artifact(ArtifactKind::Codec, "a/Codec.lib");
        let d = builder.build();
        assert_eq!(d.artifact(ArtifactKind::Codec), Some(Path::new("a/Codec.lib")));
        assert!(d.artifact(ArtifactKind::FbxSdk).is_none());
    }

    #[test]
    fn json_shape() {
        let mut builder = DescriptorBuilder::new("M");
        builder
            .public_dependency("Core")
            .runtime_dependency("x.dll", None)
            .artifact(ArtifactKind::FbxSdk, "libfbxsdk.lib");
        let json = serde_json::to_value(builder.build()).unwrap();
        assert_eq!(json["public-dependencies"][0], "Core");
        assert_eq!(json["artifacts"][0]["kind"], "fbx-sdk");
        assert!(json["runtime-dependencies"][0].get("source").is_none());
        assert_eq!(json["compile"]["pch-usage"], "default");
    }
}
