//! Error types for hook-git

use std::path::PathBuf;

/// Result type for hook-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hook-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] hook_fs::Error),

    #[error("Not inside a git work tree: {path}")]
    NotARepository { path: PathBuf },

    #[error("Repository at {path} has no work tree")]
    BareRepository { path: PathBuf },

    #[error("Could not clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Revision '{rev}' not found in {url}")]
    RevisionNotFound { url: String, rev: String },

    #[error("Could not determine a cache directory; set {var}")]
    NoCacheDir { var: &'static str },
}
