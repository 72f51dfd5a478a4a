use thiserror::Error;

/// Unified error type for release-pilot operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Build error: {0}")]
    Build(String),

    #[error("Consistency error: {0}")]
    Consistency(String),

    #[error("Publication error: {0}")]
    Publication(String),

    #[error("Post-release error: {0}")]
    PostRelease(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-pilot
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a build/validation error with context
    pub fn build(msg: impl Into<String>) -> Self {
        ReleaseError::Build(msg.into())
    }

    /// Create a tag/version consistency error with context
    pub fn consistency(msg: impl Into<String>) -> Self {
        ReleaseError::Consistency(msg.into())
    }

    /// Create a publication error with context
    pub fn publication(msg: impl Into<String>) -> Self {
        ReleaseError::Publication(msg.into())
    }

    /// Create a post-release automation error with context
    pub fn post_release(msg: impl Into<String>) -> Self {
        ReleaseError::PostRelease(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Process exit code for this error class.
    ///
    /// Each failure class gets a distinct non-zero code so an operator (or a
    /// wrapping automation) can tell which check failed without parsing output.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Build(_) => 10,
            ReleaseError::Consistency(_) => 11,
            ReleaseError::Publication(_) => 12,
            ReleaseError::PostRelease(_) => 13,
            ReleaseError::Config(_) => 14,
            ReleaseError::Git(_) | ReleaseError::Io(_) => 1,
        }
    }
}
