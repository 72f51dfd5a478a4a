use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::ReleaseTag;
use crate::error::{ReleaseError, Result};
use crate::git_ops::GitRepo;
use crate::host::{PrRef, PullRequestSpec, ReleaseHost};
use crate::{ui, version};
use std::fs;
use std::path::Path;

/// Dev-version-bump stage: move mainline to the next development version.
///
/// Runs only after both release stages have succeeded, and only for `x.y.0`
/// tags. Mints a run-scoped automation credential, branches off mainline,
/// rewrites the version file, commits, pushes, and opens a labelled pull
/// request. A failure here leaves the already-published releases untouched;
/// there is no compensating rollback.
pub fn run(config: &Config, host: &dyn ReleaseHost, tag: &ReleaseTag) -> Result<PrRef> {
    run_inner(config, host, tag).map_err(|e| match e {
        err @ ReleaseError::PostRelease(_) => err,
        other => ReleaseError::post_release(other.to_string()),
    })
}

fn run_inner(config: &Config, host: &dyn ReleaseHost, tag: &ReleaseTag) -> Result<PrRef> {
    let token = host.automation_token()?;

    let repo = GitRepo::new().map_err(|e| ReleaseError::post_release(e.to_string()))?;
    if repo.is_dirty()? {
        ui::display_boundary_warning(&BoundaryWarning::DirtyWorktree {
            branch: config.release.mainline.clone(),
        });
    }

    let next = version::dev_bump(tag.version())?;
    let branch = format!("auto/dev-v{}", next);

    repo.checkout_new_branch(&config.release.mainline, &branch)?;

    let version_file = Path::new(&config.release.version_file);
    let contents = fs::read_to_string(version_file)?;
    let rewritten = version::rewrite_version_line(&contents, &next)?;
    fs::write(version_file, rewritten)?;

    repo.commit_paths(
        &[version_file],
        &format!("chore: update version to v{}", next),
    )?;
    repo.push_branch(&config.release.remote, &branch, &token)?;

    host.open_pull_request(&PullRequestSpec {
        branch,
        base: config.release.mainline.clone(),
        title: format!("Bump development version to v{}", next),
        body: format!(
            "Automated follow-up to the {} release: moves {} to the v{} development version.",
            tag,
            config.release.mainline,
            next
        ),
        labels: config.release.labels.clone(),
    })
}
