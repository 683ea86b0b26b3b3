//! On-disk checks for resolved artifacts.
//!
//! Resolution never touches the filesystem; this module is the separate I/O
//! step. [`ArtifactChecks`] is a lazy iterator, so a caller can stop checking
//! at any point by dropping it.

use std::path::{Path, PathBuf};

use crate::descriptor::ModuleDescriptor;
use crate::error::{Result, RulesError};

/// Result of checking one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Found at the given path.
    Present(PathBuf),
    /// Not found; lists every location tried, verbatim.
    Missing(Vec<PathBuf>),
    /// Path contains build-system macros and cannot be checked here.
    Skipped,
}

/// One checked entry of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCheck {
    /// The path as it appears in the descriptor.
    pub path: PathBuf,
    pub status: CheckStatus,
}

/// Lazily checks every artifact binding and runtime-dependency file of a descriptor.
#[derive(Debug)]
pub struct ArtifactChecks<'a> {
    descriptor: &'a ModuleDescriptor,
    pending: std::vec::IntoIter<&'a Path>,
}

impl<'a> ArtifactChecks<'a> {
    pub fn new(descriptor: &'a ModuleDescriptor) -> Self {
        let mut pending: Vec<&Path> = descriptor.artifacts.iter().map(|a| a.path.as_path()).collect();
        pending.extend(
            descriptor
                .runtime_dependencies
                .iter()
                .map(|d| d.source.as_deref().unwrap_or(&d.path)),
        );
        Self {
            descriptor,
            pending: pending.into_iter(),
        }
    }

    fn check(&self, path: &Path) -> CheckStatus {
        if path.to_string_lossy().contains("$(") {
            return CheckStatus::Skipped;
        }
        let candidates: Vec<PathBuf> = if is_bare_file_name(path) {
            self.descriptor
                .public_library_paths
                .iter()
                .map(|dir| dir.join(path))
                .collect()
        } else {
            vec![path.to_path_buf()]
        };
        match candidates.iter().find(|c| c.is_file()) {
            Some(found) => CheckStatus::Present(found.clone()),
            None if candidates.is_empty() => CheckStatus::Missing(vec![path.to_path_buf()]),
            None => CheckStatus::Missing(candidates),
        }
    }
}

impl Iterator for ArtifactChecks<'_> {
    type Item = ArtifactCheck;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.pending.next()?;
        let status = self.check(path);
        if let CheckStatus::Missing(tried) = &status {
            tracing::warn!(
                module = %self.descriptor.name,
                path = %path.display(),
                tried = tried.len(),
                "artifact not found"
            );
        }
        Some(ArtifactCheck {
            path: path.to_path_buf(),
            status,
        })
    }
}

/// Summary of checking a whole descriptor.
#[derive(Debug, Clone, Default)]
pub struct ArtifactReport {
    pub module: String,
    pub checks: Vec<ArtifactCheck>,
}

impl ArtifactReport {
    /// Entries that were not found.
    pub fn missing(&self) -> impl Iterator<Item = &ArtifactCheck> {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Missing(_)))
    }

    pub fn is_ok(&self) -> bool {
        self.missing().next().is_none()
    }

    /// Fail with the first missing file, reporting the path tried verbatim.
    pub fn into_result(self) -> Result<()> {
        let first = self.checks.into_iter().find_map(|c| match c.status {
            CheckStatus::Missing(mut tried) => Some(tried.swap_remove(0)),
            _ => None,
        });
        match first {
            Some(path) => Err(RulesError::ArtifactMissing {
                module: self.module,
                path,
            }),
            None => Ok(()),
        }
    }
}

/// Check every file a descriptor refers to.
pub fn verify_artifacts(descriptor: &ModuleDescriptor) -> ArtifactReport {
    ArtifactReport {
        module: descriptor.name.clone(),
        checks: ArtifactChecks::new(descriptor).collect(),
    }
}

fn is_bare_file_name(path: &Path) -> bool {
    path.parent().is_some_and(|p| p.as_os_str().is_empty())
}
