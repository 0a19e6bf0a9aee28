//! [`TestRepo`] builder for hook dispatch scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git;

/// A temporary git work tree with helpers for writing files and a config.
///
/// # Example
///
/// ```rust,no_run
/// use hook_test_utils::repo::TestRepo;
///
/// let repo = TestRepo::new();
/// repo.write_file("src/app.py", "x = 1\n");
/// repo.write_config("repos: []\n");
/// repo.stage_all();
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepo {
    /// Create a temporary directory holding a fresh git repository.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        git::init_repo(temp_dir.path());
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the work tree root, creating parents.
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read_file(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel))
            .unwrap_or_else(|e| panic!("TestRepo: failed to read {rel}: {e}"))
    }

    /// Write `.pre-commit-config.yaml` at the root.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        self.write_file(".pre-commit-config.yaml", yaml)
    }

    /// Stage specific paths.
    pub fn stage(&self, paths: &[&str]) {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        git::git(self.path(), &args);
    }

    pub fn stage_all(&self) {
        git::git(self.path(), &["add", "-A"]);
    }

    pub fn commit_all(&self, message: &str) {
        git::commit_all(self.path(), message);
    }
}
