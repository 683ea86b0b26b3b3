//! `acoustics-build target`: environment listing, description and validation.

use std::path::Path;

use acoustics_rules::naming::platform_libraries;
use acoustics_targets::parse::{discover_targets, environment_to_toml, validate_environment, Severity};
use acoustics_targets::TargetEnvironment;
use anyhow::{bail, Context, Result};

use crate::manifest::{builtin_targets, resolve_target};

/// List built-in environments and any defined in the project's `targets/` directory.
pub fn list(project_dir: Option<&Path>) -> Result<()> {
    println!("Built-in targets:");
    println!();
    for (name, description) in builtin_targets() {
        println!("  {name:<25} {description}");
    }

    if let Some(dir) = project_dir {
        let custom = discover_targets(dir).context("scanning targets/ directory")?;
        if !custom.is_empty() {
            println!();
            println!("Project targets:");
            println!();
            for (name, path) in custom {
                println!("  {name:<25} {}", path.display());
            }
        }
    }

    println!();
    println!("Use 'acoustics-build target describe <name>' for details.");
    Ok(())
}

/// Describe a target environment in detail.
pub fn describe(name: &str, project_dir: Option<&Path>, format: Option<&str>) -> Result<()> {
    let env = lookup(name, project_dir)?;
    match format {
        Some("toml") => {
            print!("{}", environment_to_toml(&env).context("serializing target")?);
            Ok(())
        }
        Some(other) => bail!("unknown format: '{other}' (expected toml)"),
        None => {
            print!("{}", describe_text(&env));
            Ok(())
        }
    }
}

fn describe_text(env: &TargetEnvironment) -> String {
    let mut out = format!("=== Target: {} ===\n", env.name);
    out.push_str(&format!("  Platform:         {}\n", env.platform));
    out.push_str(&format!("  Configuration:    {}\n", env.configuration));
    out.push_str(&format!("  Debug CRT opt-in: {}\n", env.debug_crt_opt_in));
    out.push_str(&format!("  Host version:     {}\n", env.host_version));
    out.push_str(&format!("  Link type:        {}\n", env.link_type));
    out.push_str(&format!("  Static CRT:       {}\n", env.use_static_crt));
    if let Some(compiler) = &env.compiler_version {
        out.push_str(&format!("  Compiler:         vs{compiler}\n"));
    }
    out.push('\n');

    match platform_libraries(env.platform) {
        Some(libs) => {
            out.push_str("--- Artifacts ---\n");
            out.push_str(&format!("  Folder:      {}", libs.arch_folder));
            if libs.per_configuration {
                out.push_str(&format!("/{}", env.artifact_configuration().folder()));
            }
            out.push('\n');
            out.push_str(&format!("  Runtime:     {}\n", libs.runtime("")));
            out.push_str(&format!("  Codec:       {}\n", libs.codec("")));
            out.push_str(&format!("  Compression: {}\n", libs.compression));
        }
        None => out.push_str("No prebuilt binaries for this platform.\n"),
    }
    out
}

/// Validate a target environment and report every issue.
pub fn validate(name: &str, project_dir: Option<&Path>) -> Result<()> {
    let env = lookup(name, project_dir)?;
    match validate_environment(&env) {
        Ok(()) => {
            println!("Target '{name}' is valid.");
            Ok(())
        }
        Err(issues) => {
            let mut errors = 0;
            for issue in &issues {
                let label = match issue.severity {
                    Severity::Error => {
                        errors += 1;
                        "error"
                    }
                    Severity::Warning => "warning",
                };
                println!("  {label}: {}", issue.message);
            }
            if errors > 0 {
                bail!("target '{name}' has {errors} error(s)");
            }
            println!("Target '{name}' is valid ({} warning(s)).", issues.len());
            Ok(())
        }
    }
}

fn lookup(name: &str, project_dir: Option<&Path>) -> Result<TargetEnvironment> {
    match resolve_target(name, project_dir)? {
        Some(env) => Ok(env),
        None => bail!(
            "unknown target: '{name}'. Use 'acoustics-build target list' to see available targets."
        ),
    }
}
