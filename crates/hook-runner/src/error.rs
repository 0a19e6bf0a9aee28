//! Error types for hook-runner
//!
//! A hook exiting non-zero is not an error; it is recorded as a failed
//! outcome in the run report. These variants cover everything that keeps
//! a hook from being run at all.

/// Result type for hook-runner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or dispatching hooks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] hook_config::Error),

    #[error(transparent)]
    Git(#[from] hook_git::Error),

    #[error(transparent)]
    Fs(#[from] hook_fs::Error),

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Hook '{id}' is not published by {repo}")]
    HookNotFound { repo: String, id: String },

    #[error("No configured hook matches '{selector}'")]
    UnknownHook { selector: String },

    #[error(
        "Hook '{id}' uses language '{language}', which hookset cannot provision; \
         install the tool and use 'language: system'"
    )]
    UnsupportedLanguage { id: String, language: String },

    #[error("Hook '{id}' has an unparseable entry: {entry}")]
    InvalidEntry { id: String, entry: String },

    #[error("Hook '{id}' failed to start '{command}': {source}")]
    Spawn {
        id: String,
        command: String,
        #[source]
        source: std::io::Error,
    },
}
