use crate::error::{ReleaseError, Result};
use crate::host::{DraftRelease, PrRef, PullRequestSpec, ReleaseHost, ReleaseRef};
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock source host for testing without any external platform.
///
/// Records every draft release and pull request it is asked to create, and can
/// be primed to report existing releases or to fail on demand.
pub struct MockHost {
    drafts: Mutex<Vec<DraftRelease>>,
    pull_requests: Mutex<Vec<PullRequestSpec>>,
    existing_releases: Mutex<HashSet<String>>,
    fail_draft: bool,
    fail_pull_request: bool,
}

impl MockHost {
    /// Create a new mock host where every operation succeeds.
    pub fn new() -> Self {
        MockHost {
            drafts: Mutex::new(Vec::new()),
            pull_requests: Mutex::new(Vec::new()),
            existing_releases: Mutex::new(HashSet::new()),
            fail_draft: false,
            fail_pull_request: false,
        }
    }

    /// Make draft creation fail.
    pub fn failing_drafts() -> Self {
        MockHost {
            fail_draft: true,
            ..MockHost::new()
        }
    }

    /// Make pull-request creation fail.
    pub fn failing_pull_requests() -> Self {
        MockHost {
            fail_pull_request: true,
            ..MockHost::new()
        }
    }

    /// Prime an existing release for a tag.
    pub fn add_existing_release(&self, tag: impl Into<String>) {
        self.existing_releases.lock().unwrap().insert(tag.into());
    }

    /// Number of draft releases created.
    pub fn draft_count(&self) -> usize {
        self.drafts.lock().unwrap().len()
    }

    /// Number of pull requests opened.
    pub fn pull_request_count(&self) -> usize {
        self.pull_requests.lock().unwrap().len()
    }

    /// The most recently opened pull request, if any.
    pub fn last_pull_request(&self) -> Option<PullRequestSpec> {
        self.pull_requests.lock().unwrap().last().cloned()
    }

    /// The most recently created draft, if any.
    pub fn last_draft(&self) -> Option<DraftRelease> {
        self.drafts.lock().unwrap().last().cloned()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseHost for MockHost {
    fn release_exists(&self, tag: &str) -> Result<bool> {
        Ok(self.existing_releases.lock().unwrap().contains(tag))
    }

    fn create_draft_release(&self, draft: &DraftRelease) -> Result<ReleaseRef> {
        if self.fail_draft {
            return Err(ReleaseError::publication(format!(
                "draft release for '{}' failed: asset upload rejected",
                draft.tag
            )));
        }

        let url = format!("https://example.test/releases/{}", draft.tag);
        self.drafts.lock().unwrap().push(draft.clone());
        Ok(ReleaseRef { url })
    }

    fn automation_token(&self) -> Result<String> {
        Ok("mock-automation-token".to_string())
    }

    fn open_pull_request(&self, spec: &PullRequestSpec) -> Result<PrRef> {
        if self.fail_pull_request {
            return Err(ReleaseError::post_release(format!(
                "pull request from '{}' failed: branch rejected",
                spec.branch
            )));
        }

        let url = format!("https://example.test/pulls/{}", spec.branch);
        self.pull_requests.lock().unwrap().push(spec.clone());
        Ok(PrRef { url })
    }
}
