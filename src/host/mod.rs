//! Source-host abstraction layer
//!
//! This module provides a trait-based abstraction over the source-hosting
//! platform's release and pull-request APIs, allowing for multiple
//! implementations including a command-backed one and a mock for testing.
//!
//! The primary abstraction is the [ReleaseHost] trait. Concrete
//! implementations:
//!
//! - [command::CommandHost]: drives the host's own CLI (e.g. `gh`)
//! - [mock::MockHost]: an in-memory implementation for testing
//!
//! Pipeline code depends on the trait rather than a concrete type so the
//! release stages can be exercised without touching any external service.

pub mod command;
pub mod mock;

pub use command::CommandHost;
pub use mock::MockHost;

use crate::error::Result;
use std::path::PathBuf;

/// A draft release to create on the source host.
///
/// The draft stays invisible to the public until a human publishes it.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRelease {
    /// Tag the release is tied to (e.g. "v1.2.0")
    pub tag: String,
    /// Human-readable release title
    pub title: String,
    /// Human-readable release body
    pub body: String,
    /// Artifact files to attach, in order
    pub assets: Vec<PathBuf>,
}

/// Reference to a created release.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRef {
    pub url: String,
}

/// A pull request to open against the mainline branch.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestSpec {
    /// Head branch carrying the change
    pub branch: String,
    /// Base branch the PR targets
    pub base: String,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// Reference to an opened pull request.
#[derive(Debug, Clone, PartialEq)]
pub struct PrRef {
    pub url: String,
}

/// Operations the pipeline needs from the source-hosting platform.
///
/// Implementors must be `Send + Sync`: the draft-release stage runs on its own
/// thread, concurrently with the index publish.
pub trait ReleaseHost: Send + Sync {
    /// Whether a release (draft or published) already exists for a tag.
    ///
    /// Best effort: the caller treats a failure here as a warning, not an
    /// error, because draft creation is knowingly non-idempotent.
    fn release_exists(&self, tag: &str) -> Result<bool>;

    /// Create a draft release and attach every asset.
    ///
    /// Attachment failure fails the whole call; a partially attached draft is
    /// reported as an error for the operator to clean up.
    fn create_draft_release(&self, draft: &DraftRelease) -> Result<ReleaseRef>;

    /// Mint a short-lived credential for the automation identity.
    ///
    /// Scoped to this run; used by the dev-bump stage to push its branch.
    fn automation_token(&self) -> Result<String>;

    /// Open a pull request.
    fn open_pull_request(&self, spec: &PullRequestSpec) -> Result<PrRef>;
}
