//! acoustics-build: resolve and verify the acoustics plugin's module descriptors.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::EnvArgs;
use manifest::AcousticsManifest;

#[derive(Parser)]
#[command(
    name = "acoustics-build",
    version,
    about = "Module descriptor resolver for the acoustics plugin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create acoustics.toml and a default target in a directory
    Init {
        /// Project directory (default: current directory)
        dir: Option<PathBuf>,
    },
    /// Resolve module descriptors for a target environment
    Resolve {
        /// Module to resolve (runtime, editor, all)
        module: Option<String>,
        #[command(flatten)]
        env: EnvArgs,
        /// Enable collision support (FBX SDK) regardless of acoustics.toml
        #[arg(long)]
        collision: bool,
        /// Output format (text, json, toml)
        #[arg(long)]
        format: Option<String>,
    },
    /// Manage target environments
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Resolve modules and check that every artifact exists on disk
    Verify {
        /// Module to check (runtime, editor, all)
        #[arg(long)]
        module: Option<String>,
        #[command(flatten)]
        env: EnvArgs,
        /// Enable collision support (FBX SDK) regardless of acoustics.toml
        #[arg(long)]
        collision: bool,
    },
    /// Check project configuration and layout
    Doctor,
}

#[derive(Subcommand)]
enum TargetAction {
    /// List available target environments
    List,
    /// Show details of a target environment
    Describe {
        /// Target name
        name: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
    /// Validate a target environment
    Validate {
        /// Target name
        name: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { dir } => commands::init::run(dir.as_deref().unwrap_or(cwd.as_path())),

        Commands::Resolve {
            module,
            env,
            collision,
            format,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::resolve::run(
                &project_dir,
                manifest.as_ref(),
                module.as_deref(),
                &env,
                collision,
                format.as_deref(),
            )
        }

        Commands::Target { action } => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or_else(|| cwd.clone());
            match action {
                TargetAction::List => commands::target::list(Some(&project_dir)),
                TargetAction::Describe { name, format } => {
                    commands::target::describe(&name, Some(&project_dir), format.as_deref())
                }
                TargetAction::Validate { name } => {
                    commands::target::validate(&name, Some(&project_dir))
                }
            }
        }

        Commands::Verify {
            module,
            env,
            collision,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::verify::run(
                &project_dir,
                manifest.as_ref(),
                module.as_deref(),
                &env,
                collision,
            )
        }

        Commands::Doctor => commands::doctor::run(&cwd),
    }
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<AcousticsManifest>, Option<PathBuf>)> {
    match AcousticsManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}
