//! Sequential hook dispatch

use std::path::{Path, PathBuf};
use std::process::Command;

use hook_config::{HookFile, Language, Stage};
use hook_fs::checksum;

use crate::filter::{EXCLUDE_NOTHING, FileFilter};
use crate::meta::MetaContext;
use crate::report::{HookOutcome, HookStatus, RunReport};
use crate::resolve::{HookKind, ResolvedHook};
use crate::tags::FileTags;
use crate::{Error, Result};

/// Command-line budget for the file names of one invocation
#[cfg(windows)]
const MAX_ARG_BYTES: usize = 32 * 1024;
#[cfg(not(windows))]
const MAX_ARG_BYTES: usize = 128 * 1024;

/// Settings for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub stage: Stage,
    /// Run only the hook with this id or alias
    pub hook: Option<String>,
    /// Stop at the first failure, on top of the config's `fail_fast`
    pub fail_fast: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            stage: Stage::PreCommit,
            hook: None,
            fail_fast: false,
        }
    }
}

/// Runs resolved hooks one after another against a set of files.
///
/// # Example
///
/// ```rust,no_run
/// use hook_config::HookFile;
/// use hook_runner::{ResolvedHook, RunOptions, Runner};
///
/// # fn example(config: HookFile, hooks: Vec<ResolvedHook>) -> hook_runner::Result<()> {
/// let runner = Runner::new(config, hooks, "/path/to/repo", RunOptions::default());
/// let report = runner.run(&["src/app.py".to_string()])?;
/// println!("{} hook(s) failed", report.failed_count());
/// # Ok(())
/// # }
/// ```
pub struct Runner {
    config: HookFile,
    hooks: Vec<ResolvedHook>,
    root: PathBuf,
    tracked: Option<Vec<String>>,
    options: RunOptions,
}

impl Runner {
    pub fn new(
        config: HookFile,
        hooks: Vec<ResolvedHook>,
        root: impl Into<PathBuf>,
        options: RunOptions,
    ) -> Self {
        Self {
            config,
            hooks,
            root: root.into(),
            tracked: None,
            options,
        }
    }

    /// Tracked files the meta checks inspect; defaults to the run's files
    pub fn with_tracked_files(mut self, tracked: Vec<String>) -> Self {
        self.tracked = Some(tracked);
        self
    }

    pub fn hooks(&self) -> &[ResolvedHook] {
        &self.hooks
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run every hook selected for the stage against `files`.
    ///
    /// `files` are forward-slash paths relative to the root. A hook exiting
    /// non-zero, touching a file, or failing to start is a failed outcome,
    /// not an error, so earlier outcomes always reach the report.
    ///
    /// # Errors
    ///
    /// Fails when the selector matches nothing or a pattern does not compile.
    pub fn run(&self, files: &[String]) -> Result<RunReport> {
        let global = FileFilter::new(
            self.config.files.as_deref().unwrap_or(""),
            self.config.exclude.as_deref().unwrap_or(EXCLUDE_NOTHING),
        )?;
        let candidates = global.select(files.iter().map(String::as_str));

        let all_tracked: Vec<&str> = match &self.tracked {
            Some(tracked) => tracked.iter().map(String::as_str).collect(),
            None => files.iter().map(String::as_str).collect(),
        };
        let tracked = global.select(all_tracked.iter().copied());

        let selected = self.select_hooks()?;
        let fail_fast = self.options.fail_fast || self.config.fail_fast;
        tracing::info!(
            stage = %self.options.stage,
            hooks = selected.len(),
            files = candidates.len(),
            "Running hooks"
        );

        let mut report = RunReport::default();
        for (index, hook) in selected.iter().enumerate() {
            let outcome = self.run_hook(hook, &candidates, &all_tracked, &tracked)?;
            let failed = outcome.failed();
            report.outcomes.push(outcome);

            if failed && fail_fast {
                report.stopped_early = index + 1 < selected.len();
                break;
            }
        }

        Ok(report)
    }

    fn select_hooks(&self) -> Result<Vec<&ResolvedHook>> {
        let selected: Vec<&ResolvedHook> = self
            .hooks
            .iter()
            .filter(|h| h.runs_in(self.options.stage))
            .filter(|h| match &self.options.hook {
                Some(selector) => h.is_selected_by(selector),
                None => true,
            })
            .collect();

        if let Some(selector) = &self.options.hook {
            if selected.is_empty() {
                return Err(Error::UnknownHook {
                    selector: selector.clone(),
                });
            }
        }
        Ok(selected)
    }

    fn run_hook(
        &self,
        hook: &ResolvedHook,
        candidates: &[&str],
        all_tracked: &[&str],
        tracked: &[&str],
    ) -> Result<HookOutcome> {
        let filter = hook.file_filter()?;
        let files: Vec<&str> = filter
            .select(candidates.iter().copied())
            .into_iter()
            .filter(|f| hook.types.matches(&FileTags::identify(&self.root, f)))
            .collect();

        if files.is_empty() && !hook.always_run {
            tracing::debug!(hook = %hook.id, "No files to check, skipping");
            return Ok(HookOutcome::skipped(&hook.id, &hook.name));
        }

        let before = checksum::snapshot(&self.root, candidates.iter().copied());
        let (exit_code, output) = match hook.kind {
            HookKind::Meta(meta) => {
                let outcome = meta.run(&MetaContext {
                    config: &self.config,
                    hooks: &self.hooks,
                    all_tracked,
                    tracked,
                    files: &files,
                    root: &self.root,
                })?;
                (Some(if outcome.passed { 0 } else { 1 }), outcome.output)
            }
            HookKind::Command => match self.run_command(hook, &files) {
                Ok((code, output)) => (Some(code), output),
                Err(
                    e @ (Error::UnsupportedLanguage { .. }
                    | Error::InvalidEntry { .. }
                    | Error::Spawn { .. }),
                ) => {
                    tracing::warn!(hook = %hook.id, error = %e, "Hook could not be run");
                    (None, format!("{}\n", e))
                }
                Err(e) => return Err(e),
            },
        };
        let after = checksum::snapshot(&self.root, candidates.iter().copied());
        let modified_files = checksum::changed_files(&before, &after);

        let status = if exit_code != Some(0) || !modified_files.is_empty() {
            HookStatus::Failed
        } else {
            HookStatus::Passed
        };
        tracing::info!(
            hook = %hook.id,
            status = %status,
            files = files.len(),
            exit_code = ?exit_code,
            modified = modified_files.len(),
            "Hook finished"
        );

        Ok(HookOutcome {
            id: hook.id.clone(),
            name: hook.name.clone(),
            status,
            file_count: files.len(),
            exit_code,
            output,
            modified_files,
            verbose: hook.verbose,
        })
    }

    /// Spawn the hook's entry once per batch of file names.
    ///
    /// Returns the first non-zero exit code (or zero) and the combined
    /// output of every invocation.
    fn run_command(&self, hook: &ResolvedHook, files: &[&str]) -> Result<(i32, String)> {
        let mut argv = match &hook.language {
            Language::Fail => {
                let mut output = format!("{}\n\n", hook.entry);
                for file in files {
                    output.push_str(file);
                    output.push('\n');
                }
                return Ok((1, output));
            }
            Language::System | Language::Script => split_entry(hook)?,
            Language::Other(language) => {
                return Err(Error::UnsupportedLanguage {
                    id: hook.id.clone(),
                    language: language.clone(),
                });
            }
        };
        if hook.language == Language::Script {
            argv[0] = hook.checkout.join(&argv[0]).to_string_lossy().into_owned();
        }
        argv.extend(hook.args.iter().cloned());

        let batches = if hook.pass_filenames {
            partition(files, MAX_ARG_BYTES)
        } else {
            vec![Vec::new()]
        };

        let mut exit_code = 0;
        let mut output = String::new();
        for batch in batches {
            tracing::debug!(
                hook = %hook.id,
                program = %argv[0],
                files = batch.len(),
                "Spawning hook"
            );
            let result = Command::new(&argv[0])
                .args(&argv[1..])
                .args(&batch)
                .current_dir(&self.root)
                .env("PRE_COMMIT", "1")
                .output()
                .map_err(|source| Error::Spawn {
                    id: hook.id.clone(),
                    command: argv.join(" "),
                    source,
                })?;

            output.push_str(&String::from_utf8_lossy(&result.stdout));
            output.push_str(&String::from_utf8_lossy(&result.stderr));

            // Killed by a signal: no code, still a failure
            let code = result.status.code().unwrap_or(-1);
            if exit_code == 0 {
                exit_code = code;
            }
        }

        Ok((exit_code, output))
    }
}

fn split_entry(hook: &ResolvedHook) -> Result<Vec<String>> {
    match shlex::split(&hook.entry) {
        Some(argv) if !argv.is_empty() => Ok(argv),
        _ => Err(Error::InvalidEntry {
            id: hook.id.clone(),
            entry: hook.entry.clone(),
        }),
    }
}

/// Split file names into batches whose combined length stays under `limit`.
///
/// A batch always holds at least one name, and no input yields one empty
/// batch so `always_run` hooks still run once.
fn partition<'a>(files: &[&'a str], limit: usize) -> Vec<Vec<&'a str>> {
    let mut batches = Vec::new();
    let mut current = Vec::new();
    let mut size = 0;

    for file in files {
        let cost = file.len() + 1;
        if !current.is_empty() && size + cost > limit {
            batches.push(std::mem::take(&mut current));
            size = 0;
        }
        current.push(*file);
        size += cost;
    }
    if !current.is_empty() || batches.is_empty() {
        batches.push(current);
    }
    batches
}
