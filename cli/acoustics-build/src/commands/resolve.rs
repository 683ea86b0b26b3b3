//! `acoustics-build resolve`: compute module descriptors for a target.

use std::fmt::Write as _;
use std::path::Path;

use acoustics_rules::ModuleDescriptor;
use acoustics_targets::TargetEnvironment;
use anyhow::{bail, Context, Result};
use serde::Serialize;

use super::{check_environment, module_kinds, resolver, EnvArgs};
use crate::manifest::AcousticsManifest;

/// Everything `resolve` prints in machine-readable formats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolveOutput {
    pub environment: TargetEnvironment,
    pub modules: Vec<ModuleDescriptor>,
}

pub fn run(
    project_dir: &Path,
    manifest: Option<&AcousticsManifest>,
    module: Option<&str>,
    env_args: &EnvArgs,
    collision: bool,
    format: Option<&str>,
) -> Result<()> {
    let output = resolve(project_dir, manifest, module, env_args, collision)?;
    print!("{}", render(&output, format)?);
    Ok(())
}

pub(crate) fn resolve(
    project_dir: &Path,
    manifest: Option<&AcousticsManifest>,
    module: Option<&str>,
    env_args: &EnvArgs,
    collision: bool,
) -> Result<ResolveOutput> {
    let kinds = module_kinds(module)?;
    let environment = env_args.environment(manifest, project_dir)?;
    check_environment(&environment)?;

    let resolver = resolver(manifest, project_dir, collision);
    let modules = kinds
        .into_iter()
        .map(|kind| {
            resolver
                .resolve(kind, &environment)
                .with_context(|| format!("resolving {kind} module for '{}'", environment.name))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ResolveOutput {
        environment,
        modules,
    })
}

pub(crate) fn render(output: &ResolveOutput, format: Option<&str>) -> Result<String> {
    match format.unwrap_or("text") {
        "text" => Ok(render_text(output)),
        "json" => {
            let mut json = serde_json::to_string_pretty(output).context("serializing to JSON")?;
            json.push('\n');
            Ok(json)
        }
        "toml" => toml::to_string_pretty(output).context("serializing to TOML"),
        other => bail!("unknown format: '{other}' (expected text, json or toml)"),
    }
}

fn render_text(output: &ResolveOutput) -> String {
    let env = &output.environment;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Target: {} ({} {}, host {}, {})",
        env.name, env.platform, env.configuration, env.host_version, env.link_type
    );
    for module in &output.modules {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Module: {} ===", module.name);
        let _ = writeln!(
            out,
            "  PCH: {:?}, optimize: {:?}",
            module.compile.pch_usage, module.compile.optimize_code
        );
        if let Some(header) = &module.compile.private_pch_header {
            let _ = writeln!(out, "  Private PCH header: {header}");
        }
        section(&mut out, "Public includes", module.public_include_paths.iter().map(|p| p.display()));
        section(&mut out, "Private includes", module.private_include_paths.iter().map(|p| p.display()));
        section(
            &mut out,
            "System includes",
            module.public_system_include_paths.iter().map(|p| p.display()),
        );
        section(&mut out, "Public dependencies", module.public_dependencies.iter());
        section(&mut out, "Private dependencies", module.private_dependencies.iter());
        section(&mut out, "Dynamically loaded", module.dynamically_loaded.iter());
        section(&mut out, "Definitions", module.public_definitions.iter());
        section(&mut out, "Library paths", module.public_library_paths.iter().map(|p| p.display()));
        section(
            &mut out,
            "Artifacts",
            module
                .artifacts
                .iter()
                .map(|a| format!("{:<12} {}", a.kind.to_string(), a.path.display())),
        );
        section(&mut out, "Delay-load DLLs", module.delay_load_dlls.iter());
        section(
            &mut out,
            "Runtime dependencies",
            module.runtime_dependencies.iter().map(|d| match &d.source {
                Some(source) => format!("{} <- {}", d.path.display(), source.display()),
                None => d.path.display().to_string(),
            }),
        );
    }
    out
}

fn section<I>(out: &mut String, title: &str, items: I)
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return;
    }
    let _ = writeln!(out, "  {title}:");
    for item in items {
        let _ = writeln!(out, "    {item}");
    }
}
