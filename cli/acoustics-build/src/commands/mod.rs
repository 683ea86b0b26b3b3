//! CLI command implementations.

pub mod doctor;
pub mod init;
pub mod resolve;
pub mod target;
pub mod verify;

use std::path::Path;

use acoustics_rules::{ModuleKind, ModuleResolver, ResolverOptions};
use acoustics_targets::parse::{validate_environment, Severity};
use acoustics_targets::{BuildConfiguration, HostVersion, LinkType, Platform, TargetEnvironment};
use anyhow::{bail, Result};
use clap::Args;

use crate::manifest::{plugin_layout, resolve_target, AcousticsManifest, FALLBACK_TARGET};

/// Target selection and per-field overrides shared by `resolve` and `verify`.
#[derive(Args, Debug, Clone, Default)]
pub struct EnvArgs {
    /// Named target environment (default: from acoustics.toml, else win64-development)
    #[arg(long)]
    pub target: Option<String>,
    /// Override the platform (Win32, Win64, Android, XboxOne, ...)
    #[arg(long)]
    pub platform: Option<Platform>,
    /// Override the build configuration (Debug, Release)
    #[arg(long)]
    pub configuration: Option<BuildConfiguration>,
    /// Opt into debug CRT artifacts for Debug builds
    #[arg(long)]
    pub debug_crt: bool,
    /// Override the host engine version (e.g., 4.22)
    #[arg(long)]
    pub host_version: Option<HostVersion>,
    /// Link monolithically
    #[arg(long)]
    pub monolithic: bool,
    /// Use the static CRT (monolithic FBX builds)
    #[arg(long)]
    pub static_crt: bool,
    /// Override the Visual Studio compiler version (e.g., 2017)
    #[arg(long)]
    pub compiler_version: Option<String>,
}

impl EnvArgs {
    /// Look up the selected target and apply the command-line overrides.
    pub fn environment(
        &self,
        manifest: Option<&AcousticsManifest>,
        project_dir: &Path,
    ) -> Result<TargetEnvironment> {
        let name = self
            .target
            .as_deref()
            .or_else(|| manifest.and_then(|m| m.default_target()))
            .unwrap_or(FALLBACK_TARGET);
        let Some(mut env) = resolve_target(name, Some(project_dir))? else {
            bail!(
                "unknown target: '{name}'. Use 'acoustics-build target list' to see available targets."
            );
        };

        if let Some(platform) = self.platform {
            env.platform = platform;
        }
        if let Some(configuration) = self.configuration {
            env.configuration = configuration;
        }
        if self.debug_crt {
            env.debug_crt_opt_in = true;
        }
        if let Some(version) = &self.host_version {
            env.host_version = version.clone();
        }
        if self.monolithic {
            env.link_type = LinkType::Monolithic;
        }
        if self.static_crt {
            env.use_static_crt = true;
        }
        if let Some(compiler) = &self.compiler_version {
            env.compiler_version = Some(compiler.clone());
        }
        Ok(env)
    }
}

/// Print validation issues; fail if any is an error.
pub(crate) fn check_environment(env: &TargetEnvironment) -> Result<()> {
    let Err(issues) = validate_environment(env) else {
        return Ok(());
    };
    let mut errors = 0;
    for issue in &issues {
        match issue.severity {
            Severity::Error => {
                errors += 1;
                eprintln!("error: {}", issue.message);
            }
            Severity::Warning => eprintln!("warning: {}", issue.message),
        }
    }
    if errors > 0 {
        bail!("target '{}' has {errors} error(s)", env.name);
    }
    Ok(())
}

/// Build a resolver from the project configuration.
pub(crate) fn resolver(
    manifest: Option<&AcousticsManifest>,
    project_dir: &Path,
    collision: bool,
) -> ModuleResolver {
    let mut options = manifest
        .map(|m| m.features.clone())
        .unwrap_or_else(ResolverOptions::default);
    if collision {
        options.collision_support = true;
    }
    ModuleResolver::new(plugin_layout(manifest, project_dir), options)
}

/// Parse a module selector: a module kind, or `all`.
pub(crate) fn module_kinds(selector: Option<&str>) -> Result<Vec<ModuleKind>> {
    match selector {
        None => Ok(ModuleKind::ALL.to_vec()),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(ModuleKind::ALL.to_vec()),
        Some(s) => Ok(vec![s.parse::<ModuleKind>()?]),
    }
}
