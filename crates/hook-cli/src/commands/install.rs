//! `hookset install` / `hookset uninstall`
//!
//! The installed git hook is a small shell shim that calls back into
//! `hookset run` for its stage. Shims carry [`MARKER`] so uninstall and
//! reinstall never touch hook scripts written by something else.

use std::path::Path;

use colored::Colorize;

use hook_config::Stage;
use hook_fs::{NormalizedPath, io};
use hook_git::GitRepo;

use crate::error::{CliError, Result};

/// Line identifying a shim written by hookset
pub const MARKER: &str = "# installed by hookset";

/// Shell script git runs for `stage`.
///
/// Prefers the binary that installed it and falls back to `hookset` on
/// `PATH` when that binary has moved.
pub fn shim(stage: Stage, exe: &str) -> String {
    format!(
        "#!/bin/sh\n\
         {MARKER}\n\
         HOOKSET=\"{exe}\"\n\
         if [ -x \"$HOOKSET\" ]; then\n    \
             exec \"$HOOKSET\" run --hook-stage {stage}\n\
         fi\n\
         exec hookset run --hook-stage {stage}\n"
    )
}

fn is_ours(content: &str) -> bool {
    content.lines().any(|line| line.trim() == MARKER)
}

fn current_exe() -> String {
    std::env::current_exe()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "hookset".to_string())
}

/// Write the shim for `stage` into the repository's hooks directory
pub fn run_install(cwd: &Path, stage: Stage, overwrite: bool) -> Result<()> {
    if !stage.is_installable() {
        return Err(CliError::user(format!(
            "'{}' hooks only run on request and have no git hook to install",
            stage
        )));
    }

    let repo = GitRepo::discover(cwd)?;
    if let Some(hooks_path) = repo.hooks_path_override()? {
        return Err(CliError::user(format!(
            "core.hooksPath is set to '{}'; git would never run the installed hook. \
             Unset it with: git config --unset-all core.hooksPath",
            hooks_path
        )));
    }

    let path = NormalizedPath::new(repo.hooks_dir().join(stage.as_str()));
    if path.is_file() && !overwrite {
        let existing = io::read_text(&path)?;
        if !is_ours(&existing) {
            return Err(CliError::user(format!(
                "{} already exists and was not installed by hookset; \
                 pass --overwrite to replace it",
                path
            )));
        }
    }

    io::write_text(&path, &shim(stage, &current_exe()))?;
    io::make_executable(&path)?;
    tracing::debug!(hook = %path, "Installed git hook shim");

    println!(
        "{} hookset installed at {}",
        "\u{2713}".green().bold(),
        path.to_string().cyan()
    );
    Ok(())
}

/// Remove hookset shims, for one stage or for every installable stage
pub fn run_uninstall(cwd: &Path, stage: Option<Stage>) -> Result<()> {
    let repo = GitRepo::discover(cwd)?;
    let stages: Vec<Stage> = match stage {
        Some(stage) => vec![stage],
        None => Stage::all_names()
            .iter()
            .filter_map(|name| Stage::parse(name))
            .filter(Stage::is_installable)
            .collect(),
    };

    let mut removed = 0;
    for stage in stages {
        let path = NormalizedPath::new(repo.hooks_dir().join(stage.as_str()));
        if !path.is_file() {
            continue;
        }
        if !is_ours(&io::read_text(&path)?) {
            tracing::warn!(hook = %path, "Leaving hook not installed by hookset");
            continue;
        }
        std::fs::remove_file(path.to_native())
            .map_err(|e| hook_fs::Error::io(path.to_native(), e))?;
        println!("{} Removed {}", "\u{2713}".green().bold(), path);
        removed += 1;
    }

    if removed == 0 {
        println!("{} No hookset hooks installed.", "note:".yellow().bold());
    }
    Ok(())
}
