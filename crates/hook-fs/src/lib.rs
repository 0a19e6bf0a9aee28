//! Filesystem helpers for hookset
//!
//! Forward-slash path handling, atomic text I/O, checksums and
//! format-agnostic loading of configuration documents.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
