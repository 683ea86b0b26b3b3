//! `acoustics-build init`: project scaffolding.

use std::fs;
use std::path::Path;

use acoustics_targets::parse::{generate_template, TARGET_SUFFIX};
use acoustics_targets::Platform;
use anyhow::{bail, Context, Result};

use crate::manifest::{AcousticsManifest, FALLBACK_TARGET, MANIFEST_FILE};

/// Initialise a plugin project in `dir` (created if needed).
pub fn run(dir: &Path) -> Result<()> {
    let name = match dir.canonicalize().ok().as_deref().and_then(Path::file_name) {
        Some(n) => n.to_string_lossy().into_owned(),
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ProjectAcoustics".to_string()),
    };
    create_project(dir, &name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    let manifest_path = project_dir.join(MANIFEST_FILE);
    if manifest_path.exists() {
        bail!("{} already exists", manifest_path.display());
    }

    let targets_dir = project_dir.join("targets");
    fs::create_dir_all(&targets_dir).context("creating targets/ directory")?;
    fs::create_dir_all(project_dir.join("ThirdParty")).context("creating ThirdParty/ directory")?;

    fs::write(&manifest_path, AcousticsManifest::template(name))
        .with_context(|| format!("writing {MANIFEST_FILE}"))?;

    let target_file = format!("{FALLBACK_TARGET}{TARGET_SUFFIX}");
    let template = generate_template(FALLBACK_TARGET, Platform::Win64)
        .context("generating target template")?;
    fs::write(targets_dir.join(&target_file), template)
        .with_context(|| format!("writing targets/{target_file}"))?;

    println!("Initialised plugin project '{name}'");
    println!("  {MANIFEST_FILE}");
    println!("  targets/{target_file}");
    println!("  ThirdParty/");

    Ok(())
}

#[cfg(test)]
mod tests {
    use acoustics_targets::parse::load_environment_toml;

    use super::*;

    #[test]
    fn init_creates_project_structure() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("plugin");

        create_project(&project_path, "plugin").unwrap();

        assert!(project_path.join(MANIFEST_FILE).is_file());
        assert!(project_path.join("targets/win64-development.target.toml").is_file());
        assert!(project_path.join("ThirdParty").is_dir());
    }

    #[test]
    fn init_generates_valid_files() {
        let dir = tempfile::tempdir().unwrap();
        create_project(dir.path(), "valid").unwrap();

        let (manifest, _) = AcousticsManifest::find_and_load(dir.path()).unwrap().unwrap();
        assert_eq!(manifest.plugin.name, "valid");

        let env =
            load_environment_toml(&dir.path().join("targets/win64-development.target.toml")).unwrap();
        assert_eq!(env.name, FALLBACK_TARGET);
        assert_eq!(env.platform, Platform::Win64);
    }

    #[test]
    fn init_refuses_existing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        create_project(dir.path(), "first").unwrap();

        let result = create_project(dir.path(), "second");
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[test]
    fn run_names_project_after_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("MyAcoustics");
        run(&project_path).unwrap();

        let (manifest, _) = AcousticsManifest::find_and_load(&project_path).unwrap().unwrap();
        assert_eq!(manifest.plugin.name, "MyAcoustics");
    }
}
