use crate::config::Config;
use crate::domain::{ArtifactSet, ReleaseTag};
use crate::error::{ReleaseError, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// Result of the tag-validation stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Version string recorded inside the source archive's metadata
    pub embedded_version: String,
    /// Whether the dev-version-bump stage must run after a successful release
    pub bump_required: bool,
}

#[derive(Debug, Deserialize)]
struct PackagedManifest {
    package: PackagedPackage,
}

#[derive(Debug, Deserialize)]
struct PackagedPackage {
    version: String,
}

/// Tag-validation stage: compare the tag against the packaged version and
/// compute the bump decision.
///
/// The comparison is exact string equality against `"v" + embedded`; no
/// normalization or semver coercion. A mismatch aborts the pipeline before
/// any release stage runs.
pub fn run(config: &Config, tag: &ReleaseTag, artifacts: &ArtifactSet) -> Result<Validation> {
    let embedded = extract_version(&artifacts.source_archive, &config.release.version_file)?;

    if !tag.matches_embedded(&embedded) {
        return Err(ReleaseError::consistency(format!(
            "tag '{}' does not match packaged version '{}'",
            tag.name(),
            embedded
        )));
    }

    Ok(Validation {
        embedded_version: embedded,
        bump_required: tag.is_minor_boundary(),
    })
}

/// Extract the version recorded in the archived package manifest.
///
/// The source archive holds a single top-level directory; the manifest sits
/// directly under it. Extraction shells out to `tar`, so nothing is unpacked
/// to disk.
pub fn extract_version(archive: &Path, manifest_name: &str) -> Result<String> {
    let listing = Command::new("tar")
        .arg("-tzf")
        .arg(archive)
        .output()
        .map_err(|e| ReleaseError::build(format!("failed to run tar: {}", e)))?;

    if !listing.status.success() {
        let stderr = String::from_utf8_lossy(&listing.stderr);
        return Err(ReleaseError::build(format!(
            "could not list source archive {}: {}",
            archive.display(),
            stderr.trim()
        )));
    }

    let entries = String::from_utf8_lossy(&listing.stdout);
    let manifest_entry = entries
        .lines()
        .find(|entry| {
            let mut parts = entry.splitn(2, '/');
            parts.next();
            parts.next() == Some(manifest_name)
        })
        .map(str::to_string)
        .ok_or_else(|| {
            ReleaseError::build(format!(
                "source archive {} has no top-level {}",
                archive.display(),
                manifest_name
            ))
        })?;

    let contents = Command::new("tar")
        .arg("-xzOf")
        .arg(archive)
        .arg(&manifest_entry)
        .output()
        .map_err(|e| ReleaseError::build(format!("failed to run tar: {}", e)))?;

    if !contents.status.success() {
        let stderr = String::from_utf8_lossy(&contents.stderr);
        return Err(ReleaseError::build(format!(
            "could not read {} from {}: {}",
            manifest_entry,
            archive.display(),
            stderr.trim()
        )));
    }

    let manifest: PackagedManifest = toml::from_str(&String::from_utf8_lossy(&contents.stdout))
        .map_err(|e| {
            ReleaseError::build(format!(
                "packaged manifest {} is malformed: {}",
                manifest_entry, e
            ))
        })?;

    Ok(manifest.package.version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Build a real source archive with a packaged manifest inside.
    fn make_archive(dir: &Path, name: &str, version: &str) -> std::path::PathBuf {
        let pkg_dir = dir.join(format!("{}-{}", name, version));
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(
            pkg_dir.join("Cargo.toml"),
            format!(
                "[package]\nname = \"{}\"\nversion = \"{}\"\nedition = \"2021\"\n",
                name, version
            ),
        )
        .unwrap();
        fs::write(pkg_dir.join("lib.rs"), "// packaged source\n").unwrap();

        let archive = dir.join(format!("{}-{}.tar.gz", name, version));
        let status = Command::new("tar")
            .arg("-czf")
            .arg(&archive)
            .arg("-C")
            .arg(dir)
            .arg(format!("{}-{}", name, version))
            .status()
            .expect("tar available");
        assert!(status.success());
        archive
    }

    #[test]
    fn test_extract_version() {
        let dir = TempDir::new().unwrap();
        let archive = make_archive(dir.path(), "widget", "1.2.3");
        assert_eq!(extract_version(&archive, "Cargo.toml").unwrap(), "1.2.3");
    }

    #[test]
    fn test_extract_version_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let archive = make_archive(dir.path(), "widget", "1.2.3");
        let err = extract_version(&archive, "pyproject.toml").unwrap_err();
        assert!(err.to_string().contains("no top-level pyproject.toml"));
    }

    #[test]
    fn test_extract_version_unreadable_archive() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("not-an-archive.tar.gz");
        fs::write(&bogus, b"plain text").unwrap();
        assert!(extract_version(&bogus, "Cargo.toml").is_err());
    }

    #[test]
    fn test_run_matching_tag() {
        let dir = TempDir::new().unwrap();
        let archive = make_archive(dir.path(), "widget", "2.0.0");
        let artifacts = ArtifactSet::new(&archive, &archive);

        let tag = ReleaseTag::parse("v2.0.0").unwrap();
        let validation = run(&Config::default(), &tag, &artifacts).unwrap();
        assert_eq!(validation.embedded_version, "2.0.0");
        assert!(validation.bump_required);
    }

    #[test]
    fn test_run_patch_release_needs_no_bump() {
        let dir = TempDir::new().unwrap();
        let archive = make_archive(dir.path(), "widget", "1.5.3");
        let artifacts = ArtifactSet::new(&archive, &archive);

        let tag = ReleaseTag::parse("v1.5.3").unwrap();
        let validation = run(&Config::default(), &tag, &artifacts).unwrap();
        assert!(!validation.bump_required);
    }

    #[test]
    fn test_run_mismatched_tag() {
        let dir = TempDir::new().unwrap();
        let archive = make_archive(dir.path(), "widget", "1.2.4");
        let artifacts = ArtifactSet::new(&archive, &archive);

        let tag = ReleaseTag::parse("v1.2.3").unwrap();
        let err = run(&Config::default(), &tag, &artifacts).unwrap_err();
        assert!(matches!(err, ReleaseError::Consistency(_)));
        assert!(err.to_string().contains("v1.2.3"));
        assert!(err.to_string().contains("1.2.4"));
    }
}
