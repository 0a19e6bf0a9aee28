//! Loading the hook configuration document

use std::path::Path;

use hook_fs::config::Format;
use hook_fs::{ConfigStore, NormalizedPath, io};

use crate::schema::HookFile;
use crate::validation::{Severity, validate};
use crate::{Error, Result};

/// Accepted configuration file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &[".pre-commit-config.yaml", ".pre-commit-config.yml"];

/// Locate the configuration file in `root`.
pub fn find_config(root: &Path) -> Result<NormalizedPath> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| NormalizedPath::new(root.join(name)))
        .find(|path| path.is_file())
        .ok_or_else(|| Error::ConfigNotFound {
            dir: root.to_path_buf(),
        })
}

/// Parse configuration text without validating it.
///
/// `origin` picks the format (by extension) and names the document in errors.
pub fn parse_config(content: &str, origin: &NormalizedPath) -> Result<HookFile> {
    if is_blank(content) {
        return Err(Error::EmptyConfig {
            path: origin.to_native(),
        });
    }

    let format = Format::from_path(origin)?;
    let file: HookFile = ConfigStore::new()
        .parse(content, format, origin)
        .map_err(|e| match e {
            hook_fs::Error::ConfigParse { message, .. } => Error::InvalidConfig {
                path: origin.to_native(),
                message,
            },
            other => Error::Fs(other),
        })?;

    Ok(file)
}

/// Read, parse and validate the configuration at `path`.
///
/// Warnings are logged; any error-level finding fails the load.
pub fn load_config(path: &NormalizedPath) -> Result<HookFile> {
    let content = io::read_text(path)?;
    let file = parse_config(&content, path)?;

    let (errors, warnings): (Vec<_>, Vec<_>) = validate(&file)
        .into_iter()
        .partition(|d| d.severity == Severity::Error);

    for warning in &warnings {
        tracing::warn!(config = %path, location = %warning.location, "{}", warning.message);
    }
    if !errors.is_empty() {
        return Err(Error::Validation {
            path: path.to_native(),
            problems: errors,
        });
    }

    tracing::debug!(
        config = %path,
        repos = file.repos.len(),
        hooks = file.hooks().count(),
        "Loaded hook configuration"
    );
    Ok(file)
}

/// True for documents with nothing but whitespace and comments
fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
