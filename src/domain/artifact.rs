use crate::config::Config;
use crate::error::{ReleaseError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The build artifact set: a source archive plus a binary distribution.
///
/// Produced exactly once by the build stage and treated as read-only by every
/// later stage, so sharing it across the concurrent release stages is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub source_archive: PathBuf,
    pub binary_dist: PathBuf,
}

impl ArtifactSet {
    pub fn new(source_archive: impl Into<PathBuf>, binary_dist: impl Into<PathBuf>) -> Self {
        ArtifactSet {
            source_archive: source_archive.into(),
            binary_dist: binary_dist.into(),
        }
    }

    /// Resolve the artifact paths from the configured templates for a version.
    pub fn locate(config: &Config, version: &str) -> Self {
        ArtifactSet::new(
            config.expand_template(&config.build.source_archive, version),
            config.expand_template(&config.build.binary_dist, version),
        )
    }

    /// Strictness check: every artifact must exist as a non-empty regular file.
    pub fn verify(&self) -> Result<()> {
        for path in self.files() {
            let meta = fs::metadata(path).map_err(|_| {
                ReleaseError::build(format!("missing build artifact: {}", path.display()))
            })?;

            if !meta.is_file() {
                return Err(ReleaseError::build(format!(
                    "build artifact is not a regular file: {}",
                    path.display()
                )));
            }

            if meta.len() == 0 {
                return Err(ReleaseError::build(format!(
                    "build artifact is empty: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// All artifact files, in attachment order.
    pub fn files(&self) -> Vec<&Path> {
        vec![self.source_archive.as_path(), self.binary_dist.as_path()]
    }
}
