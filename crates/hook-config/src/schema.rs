//! Schema of the hook configuration document
//!
//! ```yaml
//! exclude: (.*/env/.*)
//! repos:
//!   - repo: https://github.com/psf/black
//!     rev: 22.6.0
//!     hooks:
//!       - id: black
//!   - repo: local
//!     hooks:
//!       - id: cargo-fmt
//!         name: cargo fmt
//!         entry: cargo fmt --
//!         language: system
//!         files: \.rs$
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// Sentinel `repo` value for hooks defined inline in the config
pub const LOCAL_REPO: &str = "local";

/// Sentinel `repo` value for the builtin meta hooks
pub const META_REPO: &str = "meta";

/// The whole configuration document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HookFile {
    /// Hook repositories, in dispatch order
    pub repos: Vec<RepoEntry>,

    /// Global exclusion pattern applied before any hook filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Global inclusion pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,

    /// Stop after the first failing hook
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fail_fast: bool,

    /// Stages for hooks that do not list their own
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_stages: Vec<Stage>,

    /// Keys this schema does not know about
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yaml::Value>,
}

impl HookFile {
    /// Iterate over every hook together with its repository.
    pub fn hooks(&self) -> impl Iterator<Item = (&RepoEntry, &HookEntry)> {
        self.repos
            .iter()
            .flat_map(|repo| repo.hooks.iter().map(move |hook| (repo, hook)))
    }
}

/// A repository block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Repository URL, `local` or `meta`
    pub repo: String,

    /// Pinned revision; required for remote repositories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    /// Hooks to run from this repository, in order
    #[serde(default)]
    pub hooks: Vec<HookEntry>,

    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yaml::Value>,
}

/// Where a repository block's hooks come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource<'a> {
    Remote { url: &'a str, rev: &'a str },
    Local,
    Meta,
}

impl RepoEntry {
    pub fn source(&self) -> RepoSource<'_> {
        match self.repo.as_str() {
            LOCAL_REPO => RepoSource::Local,
            META_REPO => RepoSource::Meta,
            url => RepoSource::Remote {
                url,
                rev: self.rev.as_deref().unwrap_or(""),
            },
        }
    }
}

/// A hook block. Every field except `id` overrides the hook's manifest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HookEntry {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Alternative id for selecting the hook on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types_or: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_types: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_filenames: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_run: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yaml::Value>,
}

impl HookEntry {
    /// Create a hook entry that only names an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Whether `selector` names this hook by id or alias
    pub fn is_selected_by(&self, selector: &str) -> bool {
        self.id == selector || self.alias.as_deref() == Some(selector)
    }
}

/// How a hook's entry point is executed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    /// `entry` is a command found on PATH
    System,
    /// `entry` is a script path relative to the hook repository
    Script,
    /// The hook always fails, listing its files
    Fail,
    /// Any toolchain-provisioned language (python, node, ...)
    Other(String),
}

impl Language {
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::Script => "script",
            Self::Fail => "fail",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        match s.as_str() {
            "system" => Self::System,
            "script" => Self::Script,
            "fail" => Self::Fail,
            _ => Self::Other(s),
        }
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.as_str().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_source() {
        let remote = RepoEntry {
            repo: "https://github.com/psf/black".to_string(),
            rev: Some("22.6.0".to_string()),
            hooks: vec![HookEntry::new("black")],
            unknown: BTreeMap::new(),
        };
        assert_eq!(
            remote.source(),
            RepoSource::Remote {
                url: "https://github.com/psf/black",
                rev: "22.6.0"
            }
        );

        let local = RepoEntry {
            repo: "local".to_string(),
            rev: None,
            hooks: vec![],
            unknown: BTreeMap::new(),
        };
        assert_eq!(local.source(), RepoSource::Local);
    }

    #[test]
    fn test_language_serde() {
        let langs: Vec<Language> = serde_yaml::from_str("[system, script, fail, python]").unwrap();
        assert_eq!(
            langs,
            vec![
                Language::System,
                Language::Script,
                Language::Fail,
                Language::Other("python".to_string())
            ]
        );
        let json = serde_json::to_string(&Language::Other("node".into())).unwrap();
        assert_eq!(json, "\"node\"");
    }

    #[test]
    fn test_unknown_keys_are_collected() {
        let file: HookFile = serde_yaml::from_str(
            "repos: []\nminimum_pre_commit_version: '2.9.0'\nci:\n  autofix: true\n",
        )
        .unwrap();
        assert_eq!(
            file.unknown.keys().collect::<Vec<_>>(),
            vec!["ci", "minimum_pre_commit_version"]
        );
    }

    #[test]
    fn test_merge_and_rebase_stages_load() {
        let file: HookFile = serde_yaml::from_str(
            r#"
default_stages: [pre-merge-commit]
repos:
  - repo: local
    hooks:
      - id: history
        name: history
        entry: ./check-history.sh
        language: script
        stages: [merge-commit, pre-rebase, post-rewrite]
"#,
        )
        .unwrap();
        assert_eq!(file.default_stages, vec![Stage::PreMergeCommit]);
        assert_eq!(
            file.repos[0].hooks[0].stages.as_deref(),
            Some(&[Stage::PreMergeCommit, Stage::PreRebase, Stage::PostRewrite][..])
        );
    }

    #[test]
    fn test_hook_selection_by_alias() {
        let mut hook = HookEntry::new("flake8");
        hook.alias = Some("lint".to_string());
        assert!(hook.is_selected_by("flake8"));
        assert!(hook.is_selected_by("lint"));
        assert!(!hook.is_selected_by("black"));
    }

    #[test]
    fn test_hooks_iterates_in_order() {
        let file: HookFile = serde_yaml::from_str(
            r#"
repos:
  - repo: https://github.com/PyCQA/isort
    rev: 5.10.1
    hooks:
      - id: isort
  - repo: https://github.com/psf/black
    rev: 22.6.0
    hooks:
      - id: black
      - id: black-jupyter
"#,
        )
        .unwrap();
        let ids: Vec<&str> = file.hooks().map(|(_, h)| h.id.as_str()).collect();
        assert_eq!(ids, vec!["isort", "black", "black-jupyter"]);
    }
}
