//! Include/exclude selection of the files a hook sees

use regex::Regex;

use crate::tags::FileTags;
use crate::{Error, Result};

/// Exclusion pattern that matches no real path
pub const EXCLUDE_NOTHING: &str = "^$";

/// A compiled `files`/`exclude` pair.
///
/// Both patterns are searched for anywhere in the forward-slash relative
/// path, so `\.py$` matches `pkg/mod.py`; anchor with `^` to match from
/// the repository root.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: Regex,
    exclude: Regex,
}

impl FileFilter {
    pub fn new(files: &str, exclude: &str) -> Result<Self> {
        Ok(Self {
            include: compile(files)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }

    /// Keep the paths that match, preserving order
    pub fn select<'a, I>(&self, paths: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Compile a hook pattern, reporting syntax errors with the pattern text
pub fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Tag-based selection: `types` (all of), `types_or` (any of) and
/// `exclude_types` (none of)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    pub types: Vec<String>,
    pub types_or: Vec<String>,
    pub exclude_types: Vec<String>,
}

impl TypeFilter {
    pub fn matches(&self, tags: &FileTags) -> bool {
        self.types.iter().all(|t| tags.contains(t))
            && (self.types_or.is_empty() || self.types_or.iter().any(|t| tags.contains(t)))
            && !self.exclude_types.iter().any(|t| tags.contains(t))
    }
}
