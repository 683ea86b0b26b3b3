//! Entry point tying layout, options and environment together.

use std::fmt;
use std::str::FromStr;

use acoustics_targets::TargetEnvironment;
use serde::{Deserialize, Serialize};

use crate::descriptor::ModuleDescriptor;
use crate::editor::{resolve_editor_module, EDITOR_MODULE};
use crate::error::{Result, RulesError};
use crate::options::{PluginLayout, ResolverOptions};
use crate::runtime::{resolve_runtime_module, RUNTIME_MODULE};

/// The plugin's buildable modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Runtime,
    Editor,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 2] = [ModuleKind::Runtime, ModuleKind::Editor];

    /// Module name as the host build system knows it.
    pub fn module_name(self) -> &'static str {
        match self {
            ModuleKind::Runtime => RUNTIME_MODULE,
            ModuleKind::Editor => EDITOR_MODULE,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleKind::Runtime => write!(f, "runtime"),
            ModuleKind::Editor => write!(f, "editor"),
        }
    }
}

impl FromStr for ModuleKind {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        ModuleKind::ALL
            .into_iter()
            .find(|k| k.to_string() == lower || k.module_name().eq_ignore_ascii_case(&lower))
            .ok_or_else(|| RulesError::UnknownModule(s.to_string()))
    }
}

/// Computes module descriptors for target environments.
///
/// Holds no mutable state; every call is a pure function of the layout,
/// options and the environment passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleResolver {
    layout: PluginLayout,
    options: ResolverOptions,
}

impl ModuleResolver {
    pub fn new(layout: PluginLayout, options: ResolverOptions) -> Self {
        Self { layout, options }
    }

    pub fn layout(&self) -> &PluginLayout {
        &self.layout
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Runtime module: includes, dependencies and the three simulation libraries.
    pub fn resolve_runtime_module(&self, env: &TargetEnvironment) -> Result<ModuleDescriptor> {
        resolve_runtime_module(env, &self.layout, &self.options)
    }

    /// Editor/bake module: version-gated dependencies, preprocessor, optional FBX.
    pub fn resolve_editor_module(&self, env: &TargetEnvironment) -> Result<ModuleDescriptor> {
        resolve_editor_module(env, &self.layout, &self.options)
    }

    pub fn resolve(&self, kind: ModuleKind, env: &TargetEnvironment) -> Result<ModuleDescriptor> {
        match kind {
            ModuleKind::Runtime => self.resolve_runtime_module(env),
            ModuleKind::Editor => self.resolve_editor_module(env),
        }
    }

    /// Both modules, runtime first.
    pub fn resolve_all(&self, env: &TargetEnvironment) -> Result<Vec<ModuleDescriptor>> {
        ModuleKind::ALL
            .into_iter()
            .map(|kind| self.resolve(kind, env))
            .collect()
    }
}
