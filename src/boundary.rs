use std::fmt;

/// Warnings raised at the edges of the pipeline.
/// These are non-fatal issues that should be reported to the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A draft release for this tag already exists; a rerun creates a second one
    DraftAlreadyExists { tag: String },
    /// The working tree has uncommitted changes before the dev-bump commit
    DirtyWorktree { branch: String },
    /// The existing-draft query failed; the release proceeds without the check
    HostQueryFailed { reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::DraftAlreadyExists { tag } => {
                write!(
                    f,
                    "A draft release for '{}' already exists; this run will create another",
                    tag
                )
            }
            BoundaryWarning::DirtyWorktree { branch } => {
                write!(
                    f,
                    "Working tree on '{}' has uncommitted changes before the version bump",
                    branch
                )
            }
            BoundaryWarning::HostQueryFailed { reason } => {
                write!(f, "Could not query the source host for drafts: {}", reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_exists_display() {
        let warning = BoundaryWarning::DraftAlreadyExists {
            tag: "v1.2.0".to_string(),
        };
        assert!(warning.to_string().contains("v1.2.0"));
        assert!(warning.to_string().contains("another"));
    }

    #[test]
    fn test_host_query_failed_display() {
        let warning = BoundaryWarning::HostQueryFailed {
            reason: "network unreachable".to_string(),
        };
        assert!(warning.to_string().contains("network unreachable"));
    }
}
