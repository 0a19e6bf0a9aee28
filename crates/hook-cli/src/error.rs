//! Error types for hook-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from hook-config
    #[error(transparent)]
    Config(#[from] hook_config::Error),

    /// Error from hook-git
    #[error(transparent)]
    Git(#[from] hook_git::Error),

    /// Error from hook-runner
    #[error(transparent)]
    Runner(#[from] hook_runner::Error),

    /// Error from hook-fs
    #[error(transparent)]
    Fs(#[from] hook_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
