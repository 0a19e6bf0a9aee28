//! Outcome of a hook run

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookStatus {
    Passed,
    Failed,
    /// No files matched and the hook does not always run
    Skipped,
}

impl fmt::Display for HookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "Passed"),
            Self::Failed => write!(f, "Failed"),
            Self::Skipped => write!(f, "Skipped"),
        }
    }
}

/// What happened to a single hook
#[derive(Debug, Clone, Serialize)]
pub struct HookOutcome {
    pub id: String,
    pub name: String,
    pub status: HookStatus,
    /// Number of files the hook was given
    pub file_count: usize,
    /// Exit code of the first failing invocation, or of the last one;
    /// `None` when the hook was skipped or could not be started
    pub exit_code: Option<i32>,
    /// Captured stdout and stderr
    pub output: String,
    /// Files whose contents changed while the hook ran
    pub modified_files: Vec<String>,
    /// Show output even when the hook passes
    pub verbose: bool,
}

impl HookOutcome {
    pub fn skipped(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: HookStatus::Skipped,
            file_count: 0,
            exit_code: None,
            output: String::new(),
            modified_files: Vec::new(),
            verbose: false,
        }
    }

    pub fn failed(&self) -> bool {
        self.status == HookStatus::Failed
    }
}

/// Outcomes of every hook that was considered, in dispatch order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<HookOutcome>,
    /// Dispatch stopped at a failure because of `fail_fast`
    pub stopped_early: bool,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        !self.outcomes.iter().any(HookOutcome::failed)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.failed()).count()
    }

    /// Files changed by any hook, deduplicated, in first-seen order
    pub fn modified_files(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for file in self.outcomes.iter().flat_map(|o| o.modified_files.iter()) {
            if !seen.contains(&file.as_str()) {
                seen.push(file.as_str());
            }
        }
        seen
    }
}
