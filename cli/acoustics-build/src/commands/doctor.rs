//! `acoustics-build doctor`: project and layout diagnostics.

use std::path::Path;

use acoustics_rules::fbx::fbx_sdk_dir;
use acoustics_targets::parse::discover_targets;
use acoustics_targets::Platform;
use anyhow::Result;

use crate::manifest::AcousticsManifest;

/// Print diagnostic information about the project at `project_dir`.
pub fn run(project_dir: &Path) -> Result<()> {
    println!("=== Acoustics Doctor ===");
    println!();

    println!("acoustics-build version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Supported platforms: {}",
        Platform::supported()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    println!("--- Project Status ---");
    let manifest = match AcousticsManifest::find_and_load(project_dir) {
        Ok(Some((manifest, dir))) => {
            println!("  acoustics.toml: found at {}", dir.display());
            println!("  Plugin:         {}", manifest.plugin.name);
            println!("  Version:        {}", manifest.plugin.version);
            if let Some(default) = manifest.default_target() {
                println!("  Default target: {default}");
            }
            println!("  Collision:      {}", manifest.features.collision_support);
            println!("  Debugging:      {}", manifest.features.debugging);
            Some((manifest, dir))
        }
        Ok(None) => {
            println!("  acoustics.toml: not found (using default layout)");
            None
        }
        Err(e) => {
            println!("  acoustics.toml: error: {e:#}");
            None
        }
    };
    println!();

    let (manifest, root) = match &manifest {
        Some((m, dir)) => (Some(m), dir.as_path()),
        None => (None, project_dir),
    };
    let resolver = super::resolver(manifest, root, false);
    let layout = resolver.layout();

    println!("--- Layout ---");
    print_dir_status("Third-party", &layout.third_party_dir);
    print_dir_status("Engine third-party", &layout.engine_third_party_dir);
    print_dir_status("FBX SDK", &fbx_sdk_dir(layout));
    println!();

    println!("--- Project Targets ---");
    match discover_targets(root) {
        Ok(targets) if targets.is_empty() => println!("  (none)"),
        Ok(targets) => {
            for (name, path) in targets {
                println!("  {name:<25} {}", path.display());
            }
        }
        Err(e) => println!("  error scanning targets/: {e}"),
    }

    Ok(())
}

fn print_dir_status(label: &str, dir: &Path) {
    let status = if dir.is_dir() { "ok" } else { "missing" };
    println!("  {label:<20} {status:<8} {}", dir.display());
}
