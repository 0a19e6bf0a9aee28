//! Git plumbing for hookset
//!
//! Lists the files hooks run against and maintains the local store of
//! hook repositories checked out at their pinned revisions.

pub mod error;
pub mod repo;
pub mod store;

pub use error::{Error, Result};
pub use repo::GitRepo;
pub use store::{HOME_ENV_VAR, RepoStore};
