use crate::config::IndexConfig;
use crate::domain::ArtifactSet;
use crate::error::{ReleaseError, Result};
use crate::index::{PackageIndex, PublishReceipt};
use std::process::Command;

/// Package-index implementation that shells out to an uploader command.
///
/// The token command is run first and its stdout becomes the short-lived
/// upload token; the publish command receives it via the
/// `RELEASE_PILOT_INDEX_TOKEN` environment variable, with the artifact paths
/// appended as arguments.
pub struct CommandIndex {
    config: IndexConfig,
}

impl CommandIndex {
    pub fn new(config: IndexConfig) -> Self {
        CommandIndex { config }
    }
}

impl PackageIndex for CommandIndex {
    fn mint_token(&self) -> Result<String> {
        let command = self.config.token_command.as_ref().ok_or_else(|| {
            ReleaseError::config(
                "trusted publishing requires [index].token_command; no long-lived credential is read",
            )
        })?;

        let output = Command::new(command)
            .args(&self.config.token_args)
            .output()
            .map_err(|e| {
                ReleaseError::publication(format!("failed to run token command '{}': {}", command, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::publication(format!(
                "token exchange failed: {}",
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(ReleaseError::publication(
                "token command returned an empty token",
            ));
        }
        Ok(token)
    }

    fn publish(
        &self,
        version: &str,
        artifacts: &ArtifactSet,
        token: &str,
    ) -> Result<PublishReceipt> {
        let mut cmd = Command::new(&self.config.publish_command);
        cmd.args(&self.config.publish_args);
        for file in artifacts.files() {
            cmd.arg(file);
        }
        cmd.env("RELEASE_PILOT_INDEX_TOKEN", token);
        cmd.env("RELEASE_PILOT_VERSION", version);

        let output = cmd.output().map_err(|e| {
            ReleaseError::publication(format!(
                "failed to run publish command '{}': {}",
                self.config.publish_command, e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::publication(format!(
                "index publish of version {} failed (exit code {}): {}",
                version,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        // The index prints a content digest on success; keep whatever it said.
        let digest = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(PublishReceipt { digest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_token_requires_configuration() {
        let index = CommandIndex::new(IndexConfig::default());
        let err = index.mint_token().unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)));
        assert!(err.to_string().contains("token_command"));
    }

    #[test]
    fn test_mint_token_rejects_empty_output() {
        let mut config = IndexConfig::default();
        config.token_command = Some("true".to_string());
        let index = CommandIndex::new(config);

        let err = index.mint_token().unwrap_err();
        assert!(err.to_string().contains("empty token"));
    }

    #[test]
    fn test_mint_token_reads_stdout() {
        let mut config = IndexConfig::default();
        config.token_command = Some("echo".to_string());
        config.token_args = vec!["short-lived-token".to_string()];
        let index = CommandIndex::new(config);

        assert_eq!(index.mint_token().unwrap(), "short-lived-token");
    }

    #[test]
    fn test_publish_failure_is_publication_error() {
        let mut config = IndexConfig::default();
        config.publish_command = "false".to_string();
        let index = CommandIndex::new(config);

        let artifacts = ArtifactSet::new("a.tar.gz", "b.tar.gz");
        let err = index.publish("1.0.0", &artifacts, "tok").unwrap_err();
        assert!(matches!(err, ReleaseError::Publication(_)));
    }
}
