//! Locating the repository and its hook configuration
//!
//! Commands work from any directory inside a work tree: the configuration
//! is looked up at the work-tree root unless `--config` names one.

use std::path::{Path, PathBuf};

use hook_config::find_config;
use hook_fs::NormalizedPath;
use hook_git::GitRepo;

use crate::error::{CliError, Result};

/// Work-tree root containing `cwd`, or `cwd` itself outside git
pub fn project_root(cwd: &Path) -> PathBuf {
    match GitRepo::discover(cwd) {
        Ok(repo) => repo.root().to_path_buf(),
        Err(_) => cwd.to_path_buf(),
    }
}

/// The configuration file to use.
///
/// An explicit path is taken relative to `cwd`.
pub fn config_path(cwd: &Path, explicit: Option<&Path>) -> Result<NormalizedPath> {
    match explicit {
        Some(path) => Ok(NormalizedPath::new(cwd.join(path))),
        None => Ok(find_config(&project_root(cwd))?),
    }
}

/// Turn command-line paths into forward-slash paths relative to `root`.
pub fn relative_files(cwd: &Path, root: &Path, files: &[PathBuf]) -> Result<Vec<String>> {
    let cwd = dunce::canonicalize(cwd)?;
    let root = NormalizedPath::new(root);

    files
        .iter()
        .map(|file| {
            NormalizedPath::new(cwd.join(file))
                .relative_to(&root)
                .filter(|rel| !rel.as_str().is_empty())
                .map(|rel| rel.as_str().to_string())
                .ok_or_else(|| {
                    CliError::user(format!("{} is outside the repository", file.display()))
                })
        })
        .collect()
}
