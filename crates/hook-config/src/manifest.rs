//! Hook manifests published by hook repositories
//!
//! A hook repository lists the hooks it provides in
//! `.pre-commit-hooks.yaml` at its root.

use std::path::Path;

use hook_fs::{NormalizedPath, io};
use serde::{Deserialize, Serialize};

use crate::schema::Language;
use crate::stage::Stage;
use crate::{Error, Result};

/// File name of the manifest at the root of a hook repository
pub const MANIFEST_FILE_NAME: &str = ".pre-commit-hooks.yaml";

/// A hook as published by its repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookDefinition {
    pub id: String,
    pub name: String,
    pub entry: String,
    pub language: Language,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub files: String,

    #[serde(default = "default_exclude")]
    pub exclude: String,

    #[serde(default = "default_types")]
    pub types: Vec<String>,

    #[serde(default)]
    pub types_or: Vec<String>,

    #[serde(default)]
    pub exclude_types: Vec<String>,

    #[serde(default)]
    pub args: Vec<String>,

    /// Empty means every stage
    #[serde(default)]
    pub stages: Vec<Stage>,

    #[serde(default = "default_true")]
    pub pass_filenames: bool,

    #[serde(default)]
    pub always_run: bool,

    #[serde(default)]
    pub verbose: bool,
}

fn default_exclude() -> String {
    "^$".to_string()
}

fn default_types() -> Vec<String> {
    vec!["file".to_string()]
}

fn default_true() -> bool {
    true
}

impl HookDefinition {
    /// A definition with manifest defaults for everything but the required keys
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        entry: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entry: entry.into(),
            language,
            description: None,
            files: String::new(),
            exclude: default_exclude(),
            types: default_types(),
            types_or: Vec::new(),
            exclude_types: Vec::new(),
            args: Vec::new(),
            stages: Vec::new(),
            pass_filenames: true,
            always_run: false,
            verbose: false,
        }
    }
}

/// Parse manifest text
pub fn parse_manifest(content: &str, origin: &Path) -> Result<Vec<HookDefinition>> {
    serde_yaml::from_str(content).map_err(|e| Error::InvalidManifest {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the manifest from a hook repository checkout
pub fn load_manifest(repo_dir: &Path) -> Result<Vec<HookDefinition>> {
    let path = NormalizedPath::new(repo_dir.join(MANIFEST_FILE_NAME));
    if !path.is_file() {
        return Err(Error::ManifestNotFound {
            dir: repo_dir.to_path_buf(),
        });
    }
    let content = io::read_text(&path)?;
    let hooks = parse_manifest(&content, &path.to_native())?;
    tracing::debug!(manifest = %path, count = hooks.len(), "Loaded hook manifest");
    Ok(hooks)
}
