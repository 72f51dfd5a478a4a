use crate::error::Result;
use anyhow::Context;
use git2::{BranchType, Repository};
use std::path::Path;

/// Wrapper around git2 Repository for the dev-bump stage.
///
/// Provides the handful of operations the bump needs: branching off mainline,
/// committing the version-file change, and pushing the branch with the
/// run-scoped automation token.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Creates a new GitRepo instance for the current working directory.
    ///
    /// Discovers the git repository in the current directory or parent directories.
    pub fn new() -> anyhow::Result<Self> {
        let repo = Repository::discover(".").context("Not in a git repository")?;
        Ok(GitRepo { repo })
    }

    /// Open a repository at a specific path.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("No git repository at {}", path.display()))?;
        Ok(GitRepo { repo })
    }

    /// Whether the working tree has uncommitted changes.
    pub fn is_dirty(&self) -> Result<bool> {
        let mut options = git2::StatusOptions::new();
        options.include_untracked(false);
        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    /// Create a new branch at the tip of `base` and check it out.
    ///
    /// The base branch must exist locally; the new branch must not.
    pub fn checkout_new_branch(&self, base: &str, name: &str) -> Result<()> {
        let base_commit = self
            .repo
            .find_branch(base, BranchType::Local)?
            .into_reference()
            .peel_to_commit()?;

        self.repo.branch(name, &base_commit, false)?;
        self.repo.set_head(&format!("refs/heads/{}", name))?;

        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.force();
        self.repo.checkout_head(Some(&mut checkout))?;
        Ok(())
    }

    /// Stage the given paths (relative to the repository root) and commit.
    pub fn commit_paths(&self, paths: &[&Path], message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(path)?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }

    /// The message of the commit at HEAD.
    pub fn head_commit_message(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.message().unwrap_or_default().to_string())
    }

    /// Push a branch to a remote, authenticating with the automation token.
    ///
    /// Falls back to SSH keys and the default credential helper when the
    /// remote does not take token auth (e.g. a local filesystem remote).
    pub fn push_branch(&self, remote_name: &str, branch: &str, token: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            git2::Error::from_str(&format!("No remote named '{}' found", remote_name))
        })?;

        let mut push_options = git2::PushOptions::new();
        let mut callbacks = git2::RemoteCallbacks::new();

        let token = token.to_string();
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) && !token.is_empty()
            {
                return git2::Cred::userpass_plaintext("x-access-token", &token);
            }

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) =
                    git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                eprintln!("Warning: Could not update reference {}: {}", refname, status);
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}",
                    refname
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        remote.push(
            &[&format!("refs/heads/{0}:refs/heads/{0}", branch)],
            Some(&mut push_options),
        )?;
        Ok(())
    }
}
