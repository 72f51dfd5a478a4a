use crate::domain::ArtifactSet;
use crate::error::{ReleaseError, Result};
use crate::index::{PackageIndex, PublishReceipt};
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock package index for testing without a real registry.
///
/// Tracks published versions and rejects duplicates the way a real index
/// would, so rerun behavior can be tested locally.
pub struct MockIndex {
    published: Mutex<HashSet<String>>,
    fail_publish: bool,
}

impl MockIndex {
    /// Create a new mock index where publishing succeeds.
    pub fn new() -> Self {
        MockIndex {
            published: Mutex::new(HashSet::new()),
            fail_publish: false,
        }
    }

    /// Make every publish fail.
    pub fn failing() -> Self {
        MockIndex {
            published: Mutex::new(HashSet::new()),
            fail_publish: true,
        }
    }

    /// Whether a version has been published.
    pub fn is_published(&self, version: &str) -> bool {
        self.published.lock().unwrap().contains(version)
    }

    /// Number of versions published.
    pub fn publish_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

impl Default for MockIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageIndex for MockIndex {
    fn mint_token(&self) -> Result<String> {
        Ok("mock-index-token".to_string())
    }

    fn publish(
        &self,
        version: &str,
        _artifacts: &ArtifactSet,
        token: &str,
    ) -> Result<PublishReceipt> {
        if token.is_empty() {
            return Err(ReleaseError::publication("publish attempted without token"));
        }

        if self.fail_publish {
            return Err(ReleaseError::publication(format!(
                "index rejected version {}",
                version
            )));
        }

        let mut published = self.published.lock().unwrap();
        if !published.insert(version.to_string()) {
            return Err(ReleaseError::publication(format!(
                "version {} already exists on the index",
                version
            )));
        }

        Ok(PublishReceipt {
            digest: format!("sha256:mock-{}", version),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifacts() -> ArtifactSet {
        ArtifactSet::new("a.tar.gz", "b.tar.gz")
    }

    #[test]
    fn test_publish_records_version() {
        let index = MockIndex::new();
        let receipt = index.publish("1.0.0", &artifacts(), "tok").unwrap();
        assert!(receipt.digest.contains("1.0.0"));
        assert!(index.is_published("1.0.0"));
    }

    #[test]
    fn test_duplicate_publish_rejected() {
        let index = MockIndex::new();
        index.publish("1.0.0", &artifacts(), "tok").unwrap();

        let err = index.publish("1.0.0", &artifacts(), "tok").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(index.publish_count(), 1);
    }

    #[test]
    fn test_publish_requires_token() {
        let index = MockIndex::new();
        let err = index.publish("1.0.0", &artifacts(), "").unwrap_err();
        assert!(err.to_string().contains("without token"));
    }

    #[test]
    fn test_failing_index() {
        let index = MockIndex::failing();
        let err = index.publish("1.0.0", &artifacts(), "tok").unwrap_err();
        assert!(matches!(err, ReleaseError::Publication(_)));
        assert!(!index.is_published("1.0.0"));
    }
}
