//! Development-version computation and version-file rewriting.
//!
//! After an `x.y.0` release, the mainline moves to the next minor with a
//! `-dev` pre-release marker (e.g. `2.0.0` -> `2.1.0-dev`).

use crate::error::{ReleaseError, Result};
use semver::{Prerelease, Version};

/// Compute the development version that follows a released version.
pub fn dev_bump(released: &Version) -> Result<Version> {
    let mut next = Version::new(released.major, released.minor + 1, 0);
    next.pre = Prerelease::new("dev")
        .map_err(|e| ReleaseError::post_release(format!("invalid dev marker: {}", e)))?;
    Ok(next)
}

/// Rewrite the first `version = "..."` assignment in a version file.
///
/// The rewrite is textual so the rest of the file keeps its formatting.
/// Fails if no version assignment is present.
pub fn rewrite_version_line(contents: &str, new_version: &Version) -> Result<String> {
    let re = regex::Regex::new(r#"(?m)^(version\s*=\s*)"[^"]*""#)
        .map_err(|e| ReleaseError::post_release(format!("invalid version pattern: {}", e)))?;

    if !re.is_match(contents) {
        return Err(ReleaseError::post_release(
            "version file has no `version = \"...\"` line",
        ));
    }

    let replaced = re
        .replacen(contents, 1, format!("${{1}}\"{}\"", new_version))
        .into_owned();
    Ok(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_bump_from_minor_boundary() {
        let released = Version::new(2, 0, 0);
        let next = dev_bump(&released).unwrap();
        assert_eq!(next.to_string(), "2.1.0-dev");
    }

    #[test]
    fn test_dev_bump_keeps_major() {
        let released = Version::new(1, 5, 0);
        let next = dev_bump(&released).unwrap();
        assert_eq!(next.to_string(), "1.6.0-dev");
    }

    #[test]
    fn test_rewrite_version_line() {
        let manifest = "[package]\nname = \"widget\"\nversion = \"2.0.0\"\nedition = \"2021\"\n";
        let next = dev_bump(&Version::new(2, 0, 0)).unwrap();
        let rewritten = rewrite_version_line(manifest, &next).unwrap();
        assert!(rewritten.contains("version = \"2.1.0-dev\""));
        assert!(rewritten.contains("name = \"widget\""));
    }

    #[test]
    fn test_rewrite_only_first_assignment() {
        let manifest = "version = \"1.0.0\"\n[dependencies]\nserde = { version = \"1.0\" }\n";
        let rewritten = rewrite_version_line(manifest, &Version::new(1, 1, 0)).unwrap();
        assert!(rewritten.starts_with("version = \"1.1.0\""));
        assert!(rewritten.contains("serde = { version = \"1.0\" }"));
    }

    #[test]
    fn test_rewrite_missing_version_line() {
        let err = rewrite_version_line("[package]\nname = \"x\"\n", &Version::new(1, 0, 0))
            .unwrap_err();
        assert!(err.to_string().contains("no `version"));
    }

    #[test]
    fn test_rewrite_preserves_spacing() {
        let manifest = "version   =   \"0.9.0\"\n";
        let rewritten = rewrite_version_line(manifest, &Version::new(0, 10, 0)).unwrap();
        assert_eq!(rewritten, "version   =   \"0.10.0\"\n");
    }
}
