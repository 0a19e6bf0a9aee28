//! Classification of revision pins

use std::fmt;

use semver::Version;

/// Branch names that move over time and therefore do not pin anything
const MUTABLE_REFS: &[&str] = &["HEAD", "main", "master", "develop", "trunk"];

/// What kind of git reference a `rev` value looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevKind {
    /// A semver-like tag such as `v4.3.0` or `22.6.0`
    Version(Version),
    /// An abbreviated or full commit hash
    Commit(String),
    /// Any other ref name (tag, branch)
    Ref(String),
}

impl RevKind {
    pub fn classify(rev: &str) -> Self {
        let rev = rev.trim();
        let bare = rev.strip_prefix('v').unwrap_or(rev);
        if let Ok(version) = Version::parse(bare) {
            return Self::Version(version);
        }
        if (7..=40).contains(&rev.len()) && rev.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::Commit(rev.to_ascii_lowercase());
        }
        Self::Ref(rev.to_string())
    }

    /// Whether the revision names a branch that can move under the pin.
    pub fn is_mutable(&self) -> bool {
        matches!(self, Self::Ref(name) if MUTABLE_REFS.contains(&name.as_str()))
    }
}

impl fmt::Display for RevKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(v) => write!(f, "version {}", v),
            Self::Commit(sha) => write!(f, "commit {}", sha),
            Self::Ref(name) => write!(f, "ref {}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("v4.3.0", "4.3.0")]
    #[case("22.6.0", "22.6.0")]
    #[case("5.10.1", "5.10.1")]
    #[case("v1.0.0-rc.1", "1.0.0-rc.1")]
    fn test_semver_tags(#[case] rev: &str, #[case] expected: &str) {
        assert_eq!(
            RevKind::classify(rev),
            RevKind::Version(Version::parse(expected).unwrap())
        );
    }

    #[test]
    fn test_commit_hashes() {
        let full = "3298ddab3c13dd77d6ce1fc0baf97691430d84b0";
        assert_eq!(RevKind::classify(full), RevKind::Commit(full.to_string()));
        assert_eq!(
            RevKind::classify("ABCDEF1"),
            RevKind::Commit("abcdef1".to_string())
        );
    }

    #[test]
    fn test_other_refs() {
        // Two-component tags are not semver
        assert_eq!(RevKind::classify("v1.3"), RevKind::Ref("v1.3".to_string()));
        assert_eq!(RevKind::classify("stable"), RevKind::Ref("stable".to_string()));
    }

    #[test]
    fn test_mutable_refs() {
        assert!(RevKind::classify("master").is_mutable());
        assert!(RevKind::classify("HEAD").is_mutable());
        assert!(!RevKind::classify("stable").is_mutable());
        assert!(!RevKind::classify("v4.3.0").is_mutable());
    }
}
