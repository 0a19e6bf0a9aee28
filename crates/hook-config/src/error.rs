//! Error types for hook-config

use std::path::PathBuf;

use crate::validation::Diagnostic;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] hook_fs::Error),

    #[error("No hook configuration found in {dir}")]
    ConfigNotFound { dir: PathBuf },

    #[error("Hook configuration at {path} is empty")]
    EmptyConfig { path: PathBuf },

    #[error("Invalid hook configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Hook configuration at {path} failed validation:\n{}", format_problems(.problems))]
    Validation {
        path: PathBuf,
        problems: Vec<Diagnostic>,
    },

    #[error("No hook manifest found in {dir}")]
    ManifestNotFound { dir: PathBuf },

    #[error("Invalid hook manifest at {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Invalid stage: {stage}")]
    InvalidStage { stage: String },
}

fn format_problems(problems: &[Diagnostic]) -> String {
    problems
        .iter()
        .map(|p| format!("  - {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}
