//! Release pipeline orchestration.
//!
//! Stage order: build → tag validation → (draft release ∥ index publish) →
//! dev-version bump. The artifact set is produced once by the build stage and
//! shared read-only afterwards, so the two release stages run on scoped
//! threads with no shared mutable state. No stage retries; every failure is
//! terminal for its dependent sub-graph.

pub mod build;
pub mod bump;
pub mod validate;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{ArtifactSet, ReleaseTag};
use crate::error::{ReleaseError, Result};
use crate::host::{DraftRelease, PrRef, ReleaseHost, ReleaseRef};
use crate::index::{PackageIndex, PublishReceipt};
use crate::ui;
use std::thread;

/// Options for a pipeline run.
///
/// Mirrors the CLI flags but in a format suitable for orchestration logic, so
/// the pipeline can be driven programmatically without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// The tag that triggered the run (e.g. "v1.2.0")
    pub tag: String,

    /// Skip the manual-approval prompt before the index publish
    pub yes: bool,

    /// Print the plan without running any stage
    pub dry_run: bool,

    /// Run build and validation only (operator preflight)
    pub skip_publish: bool,
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub tag: String,
    pub version: String,

    /// Bump decision from the validation stage
    pub bump_required: bool,

    /// Draft release, when the source-host stage ran
    pub release: Option<ReleaseRef>,

    /// Index confirmation, when the publish stage ran
    pub receipt: Option<PublishReceipt>,

    /// Follow-up PR, when the dev-bump stage ran
    pub pull_request: Option<PrRef>,
}

/// The release pipeline, bound to a config and the two external seams.
pub struct Pipeline<'a> {
    config: &'a Config,
    host: &'a dyn ReleaseHost,
    index: &'a dyn PackageIndex,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, host: &'a dyn ReleaseHost, index: &'a dyn PackageIndex) -> Self {
        Pipeline {
            config,
            host,
            index,
        }
    }

    /// Run the pipeline for a tag.
    pub fn run(&self, opts: &PipelineOptions) -> Result<PipelineOutcome> {
        let tag = ReleaseTag::parse(&opts.tag)?;
        let version = tag.version_str();

        if opts.dry_run {
            let artifacts = ArtifactSet::locate(self.config, &version);
            let names: Vec<String> = artifacts
                .files()
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            ui::display_plan(tag.name(), &names, tag.is_minor_boundary());
            return Ok(PipelineOutcome {
                tag: tag.name().to_string(),
                version,
                bump_required: tag.is_minor_boundary(),
                release: None,
                receipt: None,
                pull_request: None,
            });
        }

        // Stage 1: build
        ui::display_status(&format!("Building artifacts for {}", tag));
        let artifacts = build::run(self.config, &tag)?;
        ui::display_success("Build artifacts verified");

        // Stage 2: tag validation
        let validation = validate::run(self.config, &tag, &artifacts)?;
        ui::display_success(&format!(
            "Tag {} matches packaged version {}",
            tag, validation.embedded_version
        ));

        let mut outcome = PipelineOutcome {
            tag: tag.name().to_string(),
            version: version.clone(),
            bump_required: validation.bump_required,
            release: None,
            receipt: None,
            pull_request: None,
        };

        if opts.skip_publish {
            ui::display_status("Skipping release stages (--skip-publish)");
            return Ok(outcome);
        }

        // Manual-approval checkpoint for the index publish. Declining is a
        // cancellation, not a failure: the draft release still goes out, the
        // index publish and the dev bump do not.
        let publish_approved = if self.config.behavior.require_approval && !opts.yes {
            ui::confirm_action(&format!(
                "Publish {} {} to the package index?",
                self.config.package.name, version
            ))?
        } else {
            true
        };

        // Stages 3 and 4: no shared mutable resource, so they run concurrently
        let (draft_result, publish_result) = thread::scope(|s| {
            let draft = s.spawn(|| self.run_host_stage(&tag, &artifacts));
            let publish =
                publish_approved.then(|| s.spawn(|| self.run_index_stage(&version, &artifacts)));

            (
                join_stage(draft.join()),
                publish.map(|handle| join_stage(handle.join())),
            )
        });

        if let Some(Err(publish_err)) = &publish_result {
            // Surface the sibling failure even when the draft error wins below
            ui::display_error(&publish_err.to_string());
        }

        let release = draft_result?;
        ui::display_success(&format!("Draft release created: {}", release.url));
        outcome.release = Some(release);

        match publish_result {
            Some(Ok(receipt)) => {
                ui::display_success(&format!(
                    "Published {} {} to the package index ({})",
                    self.config.package.name, version, receipt.digest
                ));
                outcome.receipt = Some(receipt);
            }
            Some(Err(e)) => return Err(e),
            None => {
                ui::display_status("Index publish declined; dev-version bump will not run");
                return Ok(outcome);
            }
        }

        // Stage 5: dev-version bump, only on the join of both release stages
        if outcome.bump_required {
            ui::display_status("Opening the dev-version bump pull request");
            let pr = bump::run(self.config, self.host, &tag)?;
            ui::display_success(&format!("Opened pull request: {}", pr.url));
            outcome.pull_request = Some(pr);
        }

        Ok(outcome)
    }

    fn run_host_stage(&self, tag: &ReleaseTag, artifacts: &ArtifactSet) -> Result<ReleaseRef> {
        match self.host.release_exists(tag.name()) {
            Ok(true) => ui::display_boundary_warning(&BoundaryWarning::DraftAlreadyExists {
                tag: tag.name().to_string(),
            }),
            Ok(false) => {}
            Err(e) => ui::display_boundary_warning(&BoundaryWarning::HostQueryFailed {
                reason: e.to_string(),
            }),
        }

        let draft = DraftRelease {
            tag: tag.name().to_string(),
            title: tag.name().to_string(),
            body: self
                .config
                .expand_template(&self.config.release.body, &tag.version_str()),
            assets: artifacts.files().iter().map(|p| p.to_path_buf()).collect(),
        };

        self.host.create_draft_release(&draft)
    }

    fn run_index_stage(&self, version: &str, artifacts: &ArtifactSet) -> Result<PublishReceipt> {
        let token = self.index.mint_token()?;
        self.index.publish(version, artifacts, &token)
    }
}

fn join_stage<T>(joined: thread::Result<Result<T>>) -> Result<T> {
    joined
        .map_err(|_| ReleaseError::publication("release stage thread panicked"))
        .and_then(|result| result)
}
