//! Domain types shared by the pipeline stages.

pub mod artifact;
pub mod tag;

pub use artifact::ArtifactSet;
pub use tag::ReleaseTag;
