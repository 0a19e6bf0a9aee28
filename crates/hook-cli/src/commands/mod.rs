//! Command implementations for hook-cli

pub mod clean;
pub mod install;
pub mod list;
pub mod run;
pub mod sample;
pub mod validate;

pub use clean::run_clean;
pub use install::{run_install, run_uninstall};
pub use list::run_list;
pub use run::run_hooks;
pub use sample::run_sample_config;
pub use validate::run_validate;
