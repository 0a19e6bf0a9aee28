//! Hook resolution and dispatch
//!
//! Turns a loaded [`hook_config::HookFile`] into executable hooks and runs
//! them one after another against the selected files:
//!
//! 1. [`resolve`] merges every configured hook with its manifest entry
//! 2. [`filter`] and [`tags`] pick the files each hook sees
//! 3. [`dispatch`] runs the hooks in order and collects a [`RunReport`]

pub mod dispatch;
pub mod error;
pub mod filter;
pub mod meta;
pub mod report;
pub mod resolve;
pub mod tags;

pub use dispatch::{RunOptions, Runner};
pub use error::{Error, Result};
pub use filter::{FileFilter, TypeFilter};
pub use meta::MetaHook;
pub use report::{HookOutcome, HookStatus, RunReport};
pub use resolve::{HookKind, ResolvedHook, resolve_hooks};
pub use tags::FileTags;
