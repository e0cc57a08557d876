// crates/siteman-core/src/error.rs - Error kinds shared by all content operations
//
// Every variant names the offending path, ID or parameter so the CLI can print
// the message as-is. All errors are terminal to the current command; the only
// place that downgrades one to a warning is multi-ID `edit`.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// External programs the core hands control to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Generator,
    Builder,
    Sync,
    Editor,
    Selector,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generator => "generator",
            Self::Builder => "build",
            Self::Sync => "sync",
            Self::Editor => "editor",
            Self::Selector => "selector",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur while discovering, identifying or mutating content
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid content root {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    #[error("Content already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("No content with ID {0}")]
    NotFound(usize),

    #[error("{collaborator} failed: {detail}")]
    CollaboratorFailure {
        collaborator: Collaborator,
        detail: String,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Interrupted")]
    Interrupted,
}

impl ContentError {
    /// Shorthand for a collaborator that exited unsuccessfully or could not start
    pub fn collaborator<S: Into<String>>(collaborator: Collaborator, detail: S) -> Self {
        Self::CollaboratorFailure {
            collaborator,
            detail: detail.into(),
        }
    }
}

/// Result type for content operations
pub type ContentResult<T> = Result<T, ContentError>;
