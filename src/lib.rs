pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod git_ops;
pub mod host;
pub mod index;
pub mod pipeline;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
