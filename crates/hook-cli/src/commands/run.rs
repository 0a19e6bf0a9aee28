//! `hookset run`
//!
//! Loads and validates the configuration, resolves every hook (checking
//! out remote repositories on first use), picks the files and prints one
//! status line per hook.

use std::path::Path;

use colored::Colorize;

use hook_config::load_config;
use hook_fs::NormalizedPath;
use hook_git::{GitRepo, RepoStore};
use hook_runner::{HookOutcome, HookStatus, RunOptions, RunReport, Runner, resolve_hooks};

use crate::cli::RunArgs;
use crate::context::relative_files;
use crate::error::Result;

/// Width of a status line, dots included
const LINE_WIDTH: usize = 79;

const NO_FILES: &str = "(no files to check)";

/// Run the configured hooks; returns whether every hook passed
pub fn run_hooks(
    cwd: &Path,
    config: Option<&Path>,
    store: &RepoStore,
    args: &RunArgs,
) -> Result<bool> {
    let repo = GitRepo::discover(cwd)?;
    let config_path = match config {
        Some(path) => NormalizedPath::new(cwd.join(path)),
        None => hook_config::find_config(repo.root())?,
    };
    let hook_file = load_config(&config_path)?;

    let files = if args.all_files {
        repo.all_files()?
    } else if !args.files.is_empty() {
        relative_files(cwd, repo.root(), &args.files)?
    } else {
        repo.staged_files()?
    };
    tracing::debug!(files = files.len(), stage = %args.hook_stage, "Selected files");

    let hooks = resolve_hooks(&hook_file, store, repo.root())?;
    let options = RunOptions {
        stage: args.hook_stage,
        hook: args.hook.clone(),
        fail_fast: args.fail_fast,
    };
    let runner = Runner::new(hook_file, hooks, repo.root(), options)
        .with_tracked_files(repo.all_files()?);

    let report = runner.run(&files)?;
    print_report(&report);
    Ok(report.passed())
}

fn print_report(report: &RunReport) {
    for outcome in &report.outcomes {
        println!("{}", status_line(outcome));
        print_details(outcome);
    }

    let modified = report.modified_files();
    if !modified.is_empty() {
        println!(
            "{} Hooks modified {}; review and stage the changes.",
            "note:".yellow().bold(),
            modified.join(", ")
        );
    }

    if report.stopped_early {
        println!(
            "{} Stopped after the first failure (fail_fast).",
            "note:".yellow().bold()
        );
    }
}

/// `name.....Passed`, padded to [`LINE_WIDTH`]
fn status_line(outcome: &HookOutcome) -> String {
    let (plain, colored) = match outcome.status {
        HookStatus::Passed => ("Passed".to_string(), "Passed".green().to_string()),
        HookStatus::Failed => ("Failed".to_string(), "Failed".red().to_string()),
        HookStatus::Skipped => (
            format!("{}Skipped", NO_FILES),
            format!("{}{}", NO_FILES, "Skipped".yellow()),
        ),
    };
    let dots = LINE_WIDTH
        .saturating_sub(outcome.name.chars().count() + plain.chars().count())
        .max(1);
    format!("{}{}{}", outcome.name, ".".repeat(dots), colored)
}

fn print_details(outcome: &HookOutcome) {
    let show = outcome.failed() || (outcome.verbose && outcome.status == HookStatus::Passed);
    if !show {
        return;
    }

    println!("{}", format!("- hook id: {}", outcome.id).dimmed());
    if let Some(code) = outcome.exit_code.filter(|c| *c != 0) {
        println!("{}", format!("- exit code: {}", code).dimmed());
    }
    if !outcome.modified_files.is_empty() {
        println!("{}", "- files were modified by this hook".dimmed());
    }

    let output = outcome.output.trim_end();
    if !output.is_empty() {
        println!();
        println!("{}", output);
        println!();
    }
}
