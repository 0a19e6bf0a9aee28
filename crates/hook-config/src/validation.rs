//! Structural validation of a loaded hook configuration

use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::rev::RevKind;
use crate::schema::{HookEntry, HookFile, RepoEntry, RepoSource};

/// Ids of the builtin hooks available under `repo: meta`
pub const META_HOOK_IDS: &[&str] = &["check-hooks-apply", "check-useless-excludes", "identity"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Where in the document, e.g. `repos[1].hooks[0].files`
    pub location: String,
    pub message: String,
}

impl Diagnostic {
    fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location: location.into(),
            message: message.into(),
        }
    }

    fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// Whether any diagnostic is an error
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}

/// Check every structural property of a configuration.
///
/// Diagnostics come back in document order.
pub fn validate(file: &HookFile) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if file.repos.is_empty() {
        out.push(Diagnostic::warning("repos", "no repositories configured"));
    }
    check_regex(&mut out, "exclude", file.exclude.as_deref());
    check_regex(&mut out, "files", file.files.as_deref());
    check_unknown(&mut out, "", file.unknown.keys());

    for (i, repo) in file.repos.iter().enumerate() {
        validate_repo(&mut out, &format!("repos[{}]", i), repo);
    }

    out
}

fn validate_repo(out: &mut Vec<Diagnostic>, loc: &str, repo: &RepoEntry) {
    if repo.repo.trim().is_empty() {
        out.push(Diagnostic::error(format!("{}.repo", loc), "repo must not be empty"));
    }

    match repo.source() {
        RepoSource::Remote { rev, .. } => {
            if rev.trim().is_empty() {
                out.push(Diagnostic::error(
                    format!("{}.rev", loc),
                    "rev is required for remote repositories",
                ));
            } else {
                let kind = RevKind::classify(rev);
                if kind.is_mutable() {
                    out.push(Diagnostic::warning(
                        format!("{}.rev", loc),
                        format!("'{}' is a mutable reference and does not pin a revision", rev),
                    ));
                }
            }
        }
        RepoSource::Local | RepoSource::Meta => {
            if repo.rev.is_some() {
                out.push(Diagnostic::warning(
                    format!("{}.rev", loc),
                    format!("rev is ignored for '{}' repositories", repo.repo),
                ));
            }
        }
    }

    if repo.hooks.is_empty() {
        out.push(Diagnostic::warning(format!("{}.hooks", loc), "no hooks listed"));
    }
    check_unknown(out, loc, repo.unknown.keys());

    // Without a manifest to inherit from, absent args and `args: []` are
    // the same invocation. A remote `args: []` clears the manifest's args.
    let inherits_args = matches!(repo.source(), RepoSource::Remote { .. });
    let mut seen: HashSet<(&str, Option<&[String]>, Option<&str>, Option<&str>)> =
        HashSet::new();
    for (j, hook) in repo.hooks.iter().enumerate() {
        let hook_loc = format!("{}.hooks[{}]", loc, j);
        validate_hook(out, &hook_loc, &repo.source(), hook);

        let args = match hook.args.as_deref() {
            Some([]) if !inherits_args => None,
            args => args,
        };
        let key = (
            hook.id.as_str(),
            args,
            hook.files.as_deref(),
            hook.exclude.as_deref(),
        );
        if !hook.id.is_empty() && !seen.insert(key) {
            out.push(Diagnostic::error(
                format!("{}.id", hook_loc),
                format!(
                    "hook '{}' is listed twice with identical args, files and exclude",
                    hook.id
                ),
            ));
        }
    }
}

fn validate_hook(
    out: &mut Vec<Diagnostic>,
    loc: &str,
    source: &RepoSource<'_>,
    hook: &HookEntry,
) {
    if hook.id.trim().is_empty() {
        out.push(Diagnostic::error(format!("{}.id", loc), "id must not be empty"));
    }
    check_regex(out, &format!("{}.files", loc), hook.files.as_deref());
    check_regex(out, &format!("{}.exclude", loc), hook.exclude.as_deref());

    match source {
        RepoSource::Local => {
            let required = [
                ("name", hook.name.is_none()),
                ("entry", hook.entry.is_none()),
                ("language", hook.language.is_none()),
            ];
            for (key, missing) in required {
                if missing {
                    out.push(Diagnostic::error(
                        format!("{}.{}", loc, key),
                        format!("local hooks must set '{}'", key),
                    ));
                }
            }
        }
        RepoSource::Meta => {
            if !hook.id.is_empty() && !META_HOOK_IDS.contains(&hook.id.as_str()) {
                out.push(Diagnostic::error(
                    format!("{}.id", loc),
                    format!(
                        "'{}' is not a meta hook (expected one of: {})",
                        hook.id,
                        META_HOOK_IDS.join(", ")
                    ),
                ));
            }
        }
        RepoSource::Remote { .. } => {}
    }

    check_unknown(out, loc, hook.unknown.keys());
}

fn check_regex(out: &mut Vec<Diagnostic>, loc: &str, pattern: Option<&str>) {
    if let Some(pattern) = pattern
        && let Err(e) = Regex::new(pattern)
    {
        out.push(Diagnostic::error(
            loc,
            format!("invalid regular expression '{}': {}", pattern, e),
        ));
    }
}

fn check_unknown<'a>(
    out: &mut Vec<Diagnostic>,
    loc: &str,
    keys: impl Iterator<Item = &'a String>,
) {
    for key in keys {
        let location = if loc.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", loc, key)
        };
        out.push(Diagnostic::warning(location, format!("unexpected key '{}'", key)));
    }
}
