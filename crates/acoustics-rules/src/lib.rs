//! Module rules for the acoustics plugin.
//!
//! Given a [`TargetEnvironment`](acoustics_targets::TargetEnvironment), computes
//! the build description of the plugin's two modules:
//! - **Runtime module**: links the simulation runtime, codec and zlib for the
//!   target platform and configuration
//! - **Editor/bake module**: links the bake-time preprocessor, gates editor
//!   dependencies on the host version, and optionally pulls in the FBX SDK
//!
//! Resolution is pure: identical inputs always yield identical descriptors.
//! Checking that the resolved files exist is a separate step ([`verify`]).

pub mod descriptor;
pub mod editor;
pub mod error;
pub mod fbx;
pub mod naming;
pub mod options;
pub mod resolver;
pub mod runtime;
pub mod verify;

pub use descriptor::{
    ArtifactBinding, ArtifactKind, DescriptorBuilder, ModuleDescriptor, OrderedSet,
    RuntimeDependency,
};
pub use error::{Result, RulesError};
pub use options::{PluginLayout, ResolverOptions};
pub use resolver::{ModuleKind, ModuleResolver};
pub use verify::{verify_artifacts, ArtifactReport, CheckStatus};
