use crate::error::{ReleaseError, Result};
use crate::host::{DraftRelease, PrRef, PullRequestSpec, ReleaseHost, ReleaseRef};
use std::process::Command;

/// Source-host implementation that drives the platform's own CLI.
///
/// The subcommand layout follows the `gh` CLI (`release view`, `release
/// create`, `auth token`, `pr create`), but the program is configurable so a
/// compatible wrapper can stand in.
pub struct CommandHost {
    program: String,
}

impl CommandHost {
    pub fn new(program: impl Into<String>) -> Self {
        CommandHost {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str], context: &str) -> Result<std::process::Output> {
        Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| {
                ReleaseError::publication(format!(
                    "failed to run host command '{}' for {}: {}",
                    self.program, context, e
                ))
            })
    }
}

impl ReleaseHost for CommandHost {
    fn release_exists(&self, tag: &str) -> Result<bool> {
        let output = self.run(&["release", "view", tag], "release lookup")?;
        // The CLI exits non-zero when the release does not exist; any other
        // diagnostic is surfaced to the caller as a failed query.
        if output.status.success() {
            return Ok(true);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_lowercase().contains("not found") || stderr.trim().is_empty() {
            Ok(false)
        } else {
            Err(ReleaseError::publication(format!(
                "release lookup for '{}' failed: {}",
                tag,
                stderr.trim()
            )))
        }
    }

    fn create_draft_release(&self, draft: &DraftRelease) -> Result<ReleaseRef> {
        let mut args: Vec<&str> = vec![
            "release", "create", &draft.tag, "--draft", "--title", &draft.title, "--notes",
            &draft.body,
        ];

        let asset_args: Vec<String> = draft
            .assets
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        args.extend(asset_args.iter().map(|s| s.as_str()));

        let output = self.run(&args, "draft release")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::publication(format!(
                "draft release for '{}' failed (exit code {}): {}",
                draft.tag,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(ReleaseRef { url })
    }

    fn automation_token(&self) -> Result<String> {
        let output = self.run(&["auth", "token"], "automation token")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::post_release(format!(
                "could not mint automation token: {}",
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(ReleaseError::post_release(
                "host command returned an empty automation token",
            ));
        }
        Ok(token)
    }

    fn open_pull_request(&self, spec: &PullRequestSpec) -> Result<PrRef> {
        let mut args: Vec<&str> = vec![
            "pr",
            "create",
            "--head",
            &spec.branch,
            "--base",
            &spec.base,
            "--title",
            &spec.title,
            "--body",
            &spec.body,
        ];

        for label in &spec.labels {
            args.push("--label");
            args.push(label);
        }

        let output = self.run(&args, "pull request")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::post_release(format!(
                "pull request from '{}' failed: {}",
                spec.branch,
                stderr.trim()
            )));
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(PrRef { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // Uses `false`/`true` as stand-in host programs: always-failing and
    // always-succeeding commands with empty output.

    #[test]
    fn test_missing_program_is_publication_error() {
        let host = CommandHost::new("release-pilot-no-such-program");
        let draft = DraftRelease {
            tag: "v1.0.0".to_string(),
            title: "v1.0.0".to_string(),
            body: "body".to_string(),
            assets: vec![PathBuf::from("a.tar.gz")],
        };

        let err = host.create_draft_release(&draft).unwrap_err();
        assert!(matches!(err, ReleaseError::Publication(_)));
    }

    #[test]
    fn test_failing_lookup_reads_as_absent() {
        // `false` exits 1 with no stderr, which is how the CLI reports a
        // missing release.
        let host = CommandHost::new("false");
        assert!(!host.release_exists("v9.9.9").unwrap());
    }

    #[test]
    fn test_empty_token_rejected() {
        let host = CommandHost::new("true");
        let err = host.automation_token().unwrap_err();
        assert!(matches!(err, ReleaseError::PostRelease(_)));
    }
}
