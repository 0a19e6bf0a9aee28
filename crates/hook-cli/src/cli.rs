//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hook_config::Stage;

/// hookset - Run pinned git hooks from a declarative configuration
#[derive(Parser, Debug)]
#[command(name = "hookset")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the hook configuration (default: .pre-commit-config.yaml at the repository root)
    #[arg(short, long, global = true, env = "HOOKSET_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run hooks against staged files
    ///
    /// Examples:
    ///   hookset run                      # Staged files, pre-commit stage
    ///   hookset run --all-files          # Every tracked file
    ///   hookset run black --files a.py   # One hook, explicit files
    ///   hookset run --hook-stage manual  # Hooks bound to the manual stage
    Run(RunArgs),

    /// Check the configuration without running anything
    Validate {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// List configured repositories and hooks
    List,

    /// Install the git hook shim
    Install {
        /// Git hook to install
        #[arg(short = 't', long, default_value = "pre-commit")]
        hook_type: Stage,

        /// Replace a hook script not written by hookset
        #[arg(long)]
        overwrite: bool,
    },

    /// Remove git hook shims written by hookset
    Uninstall {
        /// Git hook to remove (default: every installable hook)
        #[arg(short = 't', long)]
        hook_type: Option<Stage>,
    },

    /// Print a sample configuration
    SampleConfig,

    /// Delete all cached hook repository checkouts
    Clean,
}

/// Arguments of `hookset run`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Only run the hook with this id or alias
    pub hook: Option<String>,

    /// Run on every tracked file instead of the staged ones
    #[arg(short, long, conflicts_with = "files")]
    pub all_files: bool,

    /// Run on these files instead of the staged ones
    #[arg(long, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Stage whose hooks to run
    #[arg(long, default_value = "pre-commit")]
    pub hook_stage: Stage,

    /// Stop after the first failing hook
    #[arg(long)]
    pub fail_fast: bool,
}
