//! Builtin hooks of the `meta` repository

use std::fmt::Write as _;
use std::path::Path;

use hook_config::{HookDefinition, HookFile, Language};

use crate::filter::{EXCLUDE_NOTHING, compile};
use crate::resolve::{HookKind, ResolvedHook};
use crate::tags::FileTags;
use crate::Result;

/// Only run when the configuration itself is among the files
const CONFIG_PATTERN: &str = r"^\.pre-commit-config\.ya?ml$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaHook {
    /// Every hook matches at least one tracked file
    CheckHooksApply,
    /// Every `exclude` pattern excludes at least one tracked file
    CheckUselessExcludes,
    /// Print the files it was given
    Identity,
}

/// What a builtin looks at
pub struct MetaContext<'a> {
    pub config: &'a HookFile,
    /// All resolved hooks, whatever the stage
    pub hooks: &'a [ResolvedHook],
    /// Every tracked file
    pub all_tracked: &'a [&'a str],
    /// Tracked files that survive the global `files`/`exclude`
    pub tracked: &'a [&'a str],
    /// Files selected for this hook
    pub files: &'a [&'a str],
    pub root: &'a Path,
}

/// Result of a builtin: pass/fail and what to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaOutcome {
    pub passed: bool,
    pub output: String,
}

impl MetaHook {
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "check-hooks-apply" => Some(Self::CheckHooksApply),
            "check-useless-excludes" => Some(Self::CheckUselessExcludes),
            "identity" => Some(Self::Identity),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::CheckHooksApply => "check-hooks-apply",
            Self::CheckUselessExcludes => "check-useless-excludes",
            Self::Identity => "identity",
        }
    }

    /// The manifest entry this builtin would have if it were published
    pub fn definition(&self) -> HookDefinition {
        let name = match self {
            Self::CheckHooksApply => "Check hooks apply to the repository",
            Self::CheckUselessExcludes => "Check for useless excludes",
            Self::Identity => "identity",
        };
        let mut def = HookDefinition::new(self.id(), name, self.id(), Language::System);
        match self {
            Self::CheckHooksApply | Self::CheckUselessExcludes => {
                def.files = CONFIG_PATTERN.to_string();
                def.pass_filenames = false;
            }
            Self::Identity => def.verbose = true,
        }
        def
    }

    pub fn run(&self, ctx: &MetaContext<'_>) -> Result<MetaOutcome> {
        let problems = match self {
            Self::CheckHooksApply => hooks_that_do_not_apply(ctx)?,
            Self::CheckUselessExcludes => useless_excludes(ctx)?,
            Self::Identity => {
                let mut output = String::new();
                for file in ctx.files {
                    let _ = writeln!(output, "{}", file);
                }
                return Ok(MetaOutcome {
                    passed: true,
                    output,
                });
            }
        };

        Ok(MetaOutcome {
            passed: problems.is_empty(),
            output: problems.iter().map(|p| format!("{}\n", p)).collect(),
        })
    }
}

/// Tracked files a hook's `files` pattern and type tags accept, before its `exclude`
fn included<'a>(ctx: &MetaContext<'a>, hook: &ResolvedHook) -> Result<Vec<&'a str>> {
    let include = compile(&hook.files)?;
    Ok(ctx
        .tracked
        .iter()
        .copied()
        .filter(|f| include.is_match(f))
        .filter(|f| hook.types.matches(&FileTags::identify(ctx.root, f)))
        .collect())
}

fn hooks_that_do_not_apply(ctx: &MetaContext<'_>) -> Result<Vec<String>> {
    let mut problems = Vec::new();
    for hook in ctx.hooks {
        if hook.always_run || matches!(hook.kind, HookKind::Meta(_)) {
            continue;
        }
        let filter = hook.file_filter()?;
        let applies = included(ctx, hook)?.into_iter().any(|f| filter.matches(f));
        if !applies {
            problems.push(format!("{} does not apply to this repository", hook.id));
        }
    }
    Ok(problems)
}

fn useless_excludes(ctx: &MetaContext<'_>) -> Result<Vec<String>> {
    let mut problems = Vec::new();

    if let Some(pattern) = ctx.config.exclude.as_deref().filter(|p| *p != EXCLUDE_NOTHING) {
        let exclude = compile(pattern)?;
        if !ctx.all_tracked.iter().any(|f| exclude.is_match(f)) {
            problems.push(format!(
                "The global exclude pattern '{}' does not match any files",
                pattern
            ));
        }
    }

    for hook in ctx.hooks {
        if hook.exclude == EXCLUDE_NOTHING || matches!(hook.kind, HookKind::Meta(_)) {
            continue;
        }
        let exclude = compile(&hook.exclude)?;
        if !included(ctx, hook)?.into_iter().any(|f| exclude.is_match(f)) {
            problems.push(format!(
                "The exclude pattern '{}' for {} does not match any files",
                hook.exclude, hook.id
            ));
        }
    }

    Ok(problems)
}
