//! Hook configuration for hookset.
//!
//! Types for the `.pre-commit-config.yaml` document and for the
//! `.pre-commit-hooks.yaml` manifests that hook repositories publish,
//! together with the loader and the structural validator.

pub mod error;
pub mod loader;
pub mod manifest;
pub mod rev;
pub mod sample;
pub mod schema;
pub mod stage;
pub mod validation;

pub use error::{Error, Result};
pub use loader::{CONFIG_FILE_NAMES, find_config, load_config, parse_config};
pub use manifest::{HookDefinition, MANIFEST_FILE_NAME, load_manifest};
pub use rev::RevKind;
pub use schema::{HookEntry, HookFile, Language, RepoEntry, RepoSource};
pub use stage::Stage;
pub use validation::{Diagnostic, Severity, has_errors, validate};
