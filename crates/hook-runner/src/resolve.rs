//! Merging configured hooks with the definitions their repositories publish

use std::path::{Path, PathBuf};

use hook_config::schema::{HookEntry, HookFile, RepoSource};
use hook_config::{HookDefinition, Language, Stage, load_manifest};
use hook_git::RepoStore;

use crate::filter::{FileFilter, TypeFilter};
use crate::meta::MetaHook;
use crate::{Error, Result};

/// How a resolved hook is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// Spawn `entry` as a process
    Command,
    /// Run a builtin
    Meta(MetaHook),
}

/// A hook with every setting decided
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHook {
    /// Repository URL, `local` or `meta`
    pub repo: String,
    pub id: String,
    pub alias: Option<String>,
    pub name: String,
    pub entry: String,
    pub language: Language,
    pub args: Vec<String>,
    pub files: String,
    pub exclude: String,
    pub types: TypeFilter,
    /// Empty means every stage
    pub stages: Vec<Stage>,
    pub pass_filenames: bool,
    pub always_run: bool,
    pub verbose: bool,
    pub kind: HookKind,
    /// Directory `script` entries are relative to
    pub checkout: PathBuf,
}

impl ResolvedHook {
    /// Apply the config's overrides on top of a manifest definition.
    ///
    /// Stages fall back from the config entry to the manifest to the
    /// config's `default_stages`.
    pub fn merge(
        def: HookDefinition,
        entry: &HookEntry,
        repo: &str,
        checkout: PathBuf,
        default_stages: &[Stage],
        kind: HookKind,
    ) -> Self {
        let stages = match &entry.stages {
            Some(stages) => stages.clone(),
            None if !def.stages.is_empty() => def.stages,
            None => default_stages.to_vec(),
        };

        Self {
            repo: repo.to_string(),
            id: def.id,
            alias: entry.alias.clone(),
            name: entry.name.clone().unwrap_or(def.name),
            entry: entry.entry.clone().unwrap_or(def.entry),
            language: entry.language.clone().unwrap_or(def.language),
            args: entry.args.clone().unwrap_or(def.args),
            files: entry.files.clone().unwrap_or(def.files),
            exclude: entry.exclude.clone().unwrap_or(def.exclude),
            types: TypeFilter {
                types: entry.types.clone().unwrap_or(def.types),
                types_or: entry.types_or.clone().unwrap_or(def.types_or),
                exclude_types: entry.exclude_types.clone().unwrap_or(def.exclude_types),
            },
            stages,
            pass_filenames: entry.pass_filenames.unwrap_or(def.pass_filenames),
            always_run: entry.always_run.unwrap_or(def.always_run),
            verbose: entry.verbose.unwrap_or(def.verbose),
            kind,
            checkout,
        }
    }

    pub fn runs_in(&self, stage: Stage) -> bool {
        self.stages.is_empty() || self.stages.contains(&stage)
    }

    pub fn is_selected_by(&self, selector: &str) -> bool {
        self.id == selector || self.alias.as_deref() == Some(selector)
    }

    pub fn file_filter(&self) -> Result<FileFilter> {
        FileFilter::new(&self.files, &self.exclude)
    }
}

/// Resolve every configured hook, in configuration order.
///
/// Remote repositories are checked out through `store`; `local` hooks and
/// their scripts resolve against `root`.
pub fn resolve_hooks(
    config: &HookFile,
    store: &RepoStore,
    root: &Path,
) -> Result<Vec<ResolvedHook>> {
    let mut resolved = Vec::new();

    for repo in &config.repos {
        match repo.source() {
            RepoSource::Remote { url, rev } => {
                let checkout = store.checkout(url, rev)?;
                let manifest = load_manifest(&checkout)?;
                for entry in &repo.hooks {
                    let def = manifest
                        .iter()
                        .find(|d| d.id == entry.id)
                        .cloned()
                        .ok_or_else(|| Error::HookNotFound {
                            repo: format!("{}@{}", url, rev),
                            id: entry.id.clone(),
                        })?;
                    resolved.push(ResolvedHook::merge(
                        def,
                        entry,
                        url,
                        checkout.clone(),
                        &config.default_stages,
                        HookKind::Command,
                    ));
                }
            }
            RepoSource::Local => {
                for entry in &repo.hooks {
                    let def = HookDefinition::new(
                        entry.id.clone(),
                        entry.name.clone().unwrap_or_else(|| entry.id.clone()),
                        entry.entry.clone().unwrap_or_default(),
                        entry.language.clone().unwrap_or(Language::System),
                    );
                    resolved.push(ResolvedHook::merge(
                        def,
                        entry,
                        &repo.repo,
                        root.to_path_buf(),
                        &config.default_stages,
                        HookKind::Command,
                    ));
                }
            }
            RepoSource::Meta => {
                for entry in &repo.hooks {
                    let meta = MetaHook::parse(&entry.id).ok_or_else(|| Error::HookNotFound {
                        repo: repo.repo.clone(),
                        id: entry.id.clone(),
                    })?;
                    resolved.push(ResolvedHook::merge(
                        meta.definition(),
                        entry,
                        &repo.repo,
                        root.to_path_buf(),
                        &config.default_stages,
                        HookKind::Meta(meta),
                    ));
                }
            }
        }
    }

    tracing::debug!(count = resolved.len(), "Resolved hooks");
    Ok(resolved)
}
