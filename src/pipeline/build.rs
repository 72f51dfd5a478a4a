use crate::config::Config;
use crate::domain::{ArtifactSet, ReleaseTag};
use crate::error::{ReleaseError, Result};
use std::process::Command;

/// Build stage: run the configured build command and verify its artifacts.
///
/// The command receives the tag and version through `RELEASE_PILOT_TAG` and
/// `RELEASE_PILOT_VERSION` and must leave the source archive and binary
/// distribution at the configured template paths. Any build or strictness
/// failure aborts the pipeline before anything is published.
pub fn run(config: &Config, tag: &ReleaseTag) -> Result<ArtifactSet> {
    let output = Command::new(&config.build.command)
        .args(&config.build.args)
        .env("RELEASE_PILOT_TAG", tag.name())
        .env("RELEASE_PILOT_VERSION", tag.version_str())
        .output()
        .map_err(|e| {
            ReleaseError::build(format!(
                "failed to run build command '{}': {}",
                config.build.command, e
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReleaseError::build(format!(
            "build command '{}' failed with exit code {}: {}",
            config.build.command,
            output.status.code().unwrap_or(-1),
            stderr.trim()
        )));
    }

    let artifacts = ArtifactSet::locate(config, &tag.version_str());
    artifacts.verify()?;
    Ok(artifacts)
}
