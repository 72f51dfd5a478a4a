//! Package-index abstraction layer
//!
//! Same seam pattern as [crate::host]: a trait with a command-backed
//! implementation and a mock. Publication uses trusted publishing: a
//! short-lived, run-scoped token is minted immediately before the upload and
//! never persisted.

pub mod command;
pub mod mock;

pub use command::CommandIndex;
pub use mock::MockIndex;

use crate::domain::ArtifactSet;
use crate::error::Result;

/// Confirmation returned by the index after a successful publish.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReceipt {
    /// Content digest reported by the index
    pub digest: String,
}

/// Operations the pipeline needs from the package index.
///
/// Implementors must be `Send + Sync`: the publish stage runs on its own
/// thread, concurrently with the draft-release stage.
///
/// Publication is one-shot and non-idempotent; the index itself is expected to
/// reject a duplicate version, and that rejection surfaces as a publication
/// error here.
pub trait PackageIndex: Send + Sync {
    /// Exchange the run's identity for a short-lived upload token.
    fn mint_token(&self) -> Result<String>;

    /// Publish the artifact set under the given version.
    fn publish(&self, version: &str, artifacts: &ArtifactSet, token: &str)
        -> Result<PublishReceipt>;
}
