//! `hookset validate`

use std::path::Path;

use colored::Colorize;

use hook_config::{Diagnostic, Severity, has_errors, parse_config, validate};
use hook_fs::io;

use crate::context::config_path;
use crate::error::Result;

/// Check the configuration and print every finding.
///
/// Returns whether the configuration is acceptable: no errors, and no
/// warnings either when `strict`.
pub fn run_validate(cwd: &Path, config: Option<&Path>, strict: bool) -> Result<bool> {
    let path = config_path(cwd, config)?;
    let content = io::read_text(&path)?;
    let file = parse_config(&content, &path)?;
    let diagnostics = validate(&file);

    for diagnostic in &diagnostics {
        println!("{}", render(diagnostic));
    }

    let ok = !has_errors(&diagnostics) && !(strict && !diagnostics.is_empty());
    if ok {
        println!(
            "{} {} is valid ({} repo(s), {} hook(s))",
            "\u{2713}".green().bold(),
            path,
            file.repos.len(),
            file.hooks().count()
        );
    } else {
        println!(
            "{} {} has {} problem(s)",
            "\u{2717}".red().bold(),
            path,
            diagnostics.len()
        );
    }
    Ok(ok)
}

fn render(diagnostic: &Diagnostic) -> String {
    let label = match diagnostic.severity {
        Severity::Error => "error:".red().bold(),
        Severity::Warning => "warning:".yellow().bold(),
    };
    format!("{} {}: {}", label, diagnostic.location.cyan(), diagnostic.message)
}
