//! Git stages a hook can be bound to

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The git event a hook runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Before a commit is recorded
    #[serde(alias = "commit")]
    PreCommit,
    /// Before refs are pushed
    #[serde(alias = "push")]
    PrePush,
    /// After the commit message is written
    CommitMsg,
    /// Before the commit message editor opens
    PrepareCommitMsg,
    /// After a commit is recorded
    PostCommit,
    /// After a checkout
    PostCheckout,
    /// After a merge
    PostMerge,
    /// Before a merge commit is recorded
    #[serde(alias = "merge-commit")]
    PreMergeCommit,
    /// Before a rebase starts
    PreRebase,
    /// After `commit --amend` or `rebase` rewrites commits
    PostRewrite,
    /// Only when requested explicitly
    Manual,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreCommit => "pre-commit",
            Self::PrePush => "pre-push",
            Self::CommitMsg => "commit-msg",
            Self::PrepareCommitMsg => "prepare-commit-msg",
            Self::PostCommit => "post-commit",
            Self::PostCheckout => "post-checkout",
            Self::PostMerge => "post-merge",
            Self::PreMergeCommit => "pre-merge-commit",
            Self::PreRebase => "pre-rebase",
            Self::PostRewrite => "post-rewrite",
            Self::Manual => "manual",
        }
    }

    /// Parse a stage name, accepting the legacy `commit`, `push` and
    /// `merge-commit` spellings
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pre-commit" | "commit" => Some(Self::PreCommit),
            "pre-push" | "push" => Some(Self::PrePush),
            "commit-msg" => Some(Self::CommitMsg),
            "prepare-commit-msg" => Some(Self::PrepareCommitMsg),
            "post-commit" => Some(Self::PostCommit),
            "post-checkout" => Some(Self::PostCheckout),
            "post-merge" => Some(Self::PostMerge),
            "pre-merge-commit" | "merge-commit" => Some(Self::PreMergeCommit),
            "pre-rebase" => Some(Self::PreRebase),
            "post-rewrite" => Some(Self::PostRewrite),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    /// List all canonical stage names
    pub fn all_names() -> &'static [&'static str] {
        &[
            "pre-commit",
            "pre-push",
            "commit-msg",
            "prepare-commit-msg",
            "post-commit",
            "post-checkout",
            "post-merge",
            "pre-merge-commit",
            "pre-rebase",
            "post-rewrite",
            "manual",
        ]
    }

    /// Whether a git hook script of this name can be installed
    pub fn is_installable(&self) -> bool {
        !matches!(self, Self::Manual)
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidStage {
            stage: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_roundtrip() {
        for name in Stage::all_names() {
            let stage = Stage::parse(name).unwrap();
            assert_eq!(stage.to_string(), *name);
        }
    }

    #[test]
    fn test_legacy_names() {
        assert_eq!(Stage::parse("commit"), Some(Stage::PreCommit));
        assert_eq!(Stage::parse("push"), Some(Stage::PrePush));

        let stages: Vec<Stage> = serde_yaml::from_str("[commit, push, manual]").unwrap();
        assert_eq!(stages, vec![Stage::PreCommit, Stage::PrePush, Stage::Manual]);
    }

    #[test]
    fn test_merge_and_rewrite_stages() {
        let stages: Vec<Stage> =
            serde_yaml::from_str("[pre-merge-commit, merge-commit, pre-rebase, post-rewrite]")
                .unwrap();
        assert_eq!(
            stages,
            vec![
                Stage::PreMergeCommit,
                Stage::PreMergeCommit,
                Stage::PreRebase,
                Stage::PostRewrite,
            ]
        );
        assert_eq!(Stage::parse("merge-commit"), Some(Stage::PreMergeCommit));
        assert!(Stage::PreRebase.is_installable());
    }

    #[test]
    fn test_serializes_canonical_name() {
        let yaml = serde_yaml::to_string(&Stage::PrepareCommitMsg).unwrap();
        assert_eq!(yaml.trim(), "prepare-commit-msg");
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("pre-receive".parse::<Stage>().is_err());
        assert_eq!("pre-push".parse::<Stage>().unwrap(), Stage::PrePush);
    }

    #[test]
    fn test_manual_is_not_installable() {
        assert!(!Stage::Manual.is_installable());
        assert!(Stage::PreCommit.is_installable());
    }
}
