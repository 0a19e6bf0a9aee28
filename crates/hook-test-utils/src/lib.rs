//! Shared test utilities for the hookset workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] - git command helpers and hook repository fixtures
//! - [`repo`] - [`repo::TestRepo`], a temporary work tree with a hook config

pub mod git;
pub mod repo;
