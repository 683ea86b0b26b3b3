//! `acoustics-build verify`: resolve modules and check their files exist on disk.

use std::path::Path;

use acoustics_rules::{verify_artifacts, ArtifactReport, CheckStatus};
use anyhow::{Context, Result};

use super::resolve::resolve;
use super::EnvArgs;
use crate::manifest::AcousticsManifest;

pub fn run(
    project_dir: &Path,
    manifest: Option<&AcousticsManifest>,
    module: Option<&str>,
    env_args: &EnvArgs,
    collision: bool,
) -> Result<()> {
    let reports = check(project_dir, manifest, module, env_args, collision)?;

    let mut missing = 0;
    let mut first_missing = None;
    for report in reports {
        println!("=== {} ===", report.module);
        for check in &report.checks {
            match &check.status {
                CheckStatus::Present(found) => println!("  ok       {}", found.display()),
                CheckStatus::Skipped => println!("  skipped  {}", check.path.display()),
                CheckStatus::Missing(tried) => {
                    println!("  MISSING  {}", check.path.display());
                    for path in tried {
                        println!("           tried {}", path.display());
                    }
                }
            }
        }
        missing += report.missing().count();
        if let Err(e) = report.into_result() {
            first_missing.get_or_insert(e);
        }
    }

    if let Some(err) = first_missing {
        return Err(err).context(format!("{missing} artifact(s) missing"));
    }
    println!();
    println!("All artifacts present.");
    Ok(())
}

pub(crate) fn check(
    project_dir: &Path,
    manifest: Option<&AcousticsManifest>,
    module: Option<&str>,
    env_args: &EnvArgs,
    collision: bool,
) -> Result<Vec<ArtifactReport>> {
    let output = resolve(project_dir, manifest, module, env_args, collision)?;
    Ok(output.modules.iter().map(verify_artifacts).collect())
}
