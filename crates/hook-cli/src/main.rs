//! hookset CLI
//!
//! Runs pinned git hooks declared in `.pre-commit-config.yaml`.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;
use hook_git::RepoStore;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded; hook failures and invalid
/// configurations are not errors but still exit non-zero.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config.as_deref()),
        None => {
            // No command provided - show help hint
            println!("{} Run pinned git hooks", "hookset".green().bold());
            println!();
            println!("Run {} for available commands.", "hookset --help".cyan());
            Ok(true)
        }
    }
}

fn init_tracing(verbose: bool) {
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(verbose);
    let result = if verbose {
        tracing::subscriber::set_global_default(builder.with_max_level(Level::DEBUG).finish())
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())
    };
    if result.is_err() {
        eprintln!("{} tracing subscriber already set", "warning:".yellow().bold());
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands, config: Option<&std::path::Path>) -> Result<bool> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Run(args) => {
            let store = RepoStore::from_env()?;
            commands::run_hooks(&cwd, config, &store, &args)
        }
        Commands::Validate { strict } => commands::run_validate(&cwd, config, strict),
        Commands::List => commands::run_list(&cwd, config).map(|()| true),
        Commands::Install {
            hook_type,
            overwrite,
        } => commands::run_install(&cwd, hook_type, overwrite).map(|()| true),
        Commands::Uninstall { hook_type } => {
            commands::run_uninstall(&cwd, hook_type).map(|()| true)
        }
        Commands::SampleConfig => commands::run_sample_config().map(|()| true),
        Commands::Clean => {
            let store = RepoStore::from_env()?;
            commands::run_clean(&store).map(|()| true)
        }
    }
}
