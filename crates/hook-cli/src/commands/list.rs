//! `hookset list`

use std::path::Path;

use colored::Colorize;

use hook_config::{RepoSource, parse_config};
use hook_fs::io;

use crate::context::config_path;
use crate::error::Result;

/// Tabulate repositories, revisions and hook ids
pub fn run_list(cwd: &Path, config: Option<&Path>) -> Result<()> {
    let path = config_path(cwd, config)?;
    let file = parse_config(&io::read_text(&path)?, &path)?;

    if file.repos.is_empty() {
        println!("{} No repositories configured in {}.", "note:".yellow().bold(), path);
        println!(
            "\n{} Start from the sample: {}",
            "hint:".cyan().bold(),
            "hookset sample-config > .pre-commit-config.yaml".cyan()
        );
        return Ok(());
    }

    println!(
        "{} {} repo(s), {} hook(s) in {}:\n",
        "=>".blue().bold(),
        file.repos.len(),
        file.hooks().count(),
        path
    );
    if let Some(exclude) = &file.exclude {
        println!("  {} {}\n", "global exclude:".bold(), exclude);
    }

    let width = file.repos.iter().map(|r| r.repo.len()).max().unwrap_or(0).max(4);
    println!(
        "  {}  {} {}",
        format!("{:<width$}", "REPO").bold(),
        format!("{:<10}", "REV").bold(),
        "HOOKS".bold()
    );
    println!("  {}", "\u{2500}".repeat(width + 30).dimmed());

    for repo in &file.repos {
        let rev = match repo.source() {
            RepoSource::Remote { rev, .. } => rev.to_string(),
            RepoSource::Local | RepoSource::Meta => "-".to_string(),
        };
        let hooks: Vec<&str> = repo.hooks.iter().map(|h| h.id.as_str()).collect();
        println!(
            "  {}  {:<10} {}",
            format!("{:<width$}", repo.repo).cyan(),
            rev,
            hooks.join(", ").dimmed()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_sample() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".pre-commit-config.yaml"),
            hook_config::sample::sample_config(),
        )
        .unwrap();
        assert!(run_list(temp.path(), None).is_ok());
    }

    #[test]
    fn test_list_without_config() {
        let temp = TempDir::new().unwrap();
        assert!(run_list(temp.path(), None).is_err());
    }
}
