use crate::error::{ReleaseError, Result};
use std::fmt;

/// A release tag in the strict `vMAJOR.MINOR.PATCH` grammar.
///
/// The grammar is deliberately narrower than what semver accepts: no `V`
/// prefix, no pre-release or build suffix, no leading zeros stripped. The tag
/// is the trigger for the whole pipeline and must match the packaged version
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    name: String,
    version: semver::Version,
}

impl ReleaseTag {
    /// Parse a release tag, rejecting anything outside `v<digits>.<digits>.<digits>`.
    pub fn parse(name: &str) -> Result<Self> {
        let re = regex::Regex::new(r"^v(\d+)\.(\d+)\.(\d+)$")
            .map_err(|e| ReleaseError::consistency(format!("invalid tag grammar: {}", e)))?;

        let captures = re.captures(name).ok_or_else(|| {
            ReleaseError::consistency(format!(
                "tag '{}' does not match the release grammar vMAJOR.MINOR.PATCH",
                name
            ))
        })?;

        let component = |i: usize| -> Result<u64> {
            captures[i].parse::<u64>().map_err(|_| {
                ReleaseError::consistency(format!(
                    "tag '{}' has a non-numeric version component",
                    name
                ))
            })
        };

        let version = semver::Version::new(component(1)?, component(2)?, component(3)?);

        Ok(ReleaseTag {
            name: name.to_string(),
            version,
        })
    }

    /// The full tag name, e.g. "v1.2.3".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed version.
    pub fn version(&self) -> &semver::Version {
        &self.version
    }

    /// The version as a plain string, e.g. "1.2.3".
    pub fn version_str(&self) -> String {
        self.version.to_string()
    }

    /// Whether this tag requires a dev-version bump after release.
    ///
    /// True exactly when the patch component is zero; point releases never
    /// start a new development cycle.
    pub fn is_minor_boundary(&self) -> bool {
        self.version.patch == 0
    }

    /// Exact-equality check against the version embedded in the built package.
    ///
    /// Plain string comparison: no normalization, no semver coercion.
    pub fn matches_embedded(&self, embedded: &str) -> bool {
        self.name == format!("v{}", embedded)
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
