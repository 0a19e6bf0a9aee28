//! Git fixtures for tests.
//!
//! Everything here panics on failure; these are test helpers.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run `git` with `args` in `dir`, panicking with stderr on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed in {}:\n{}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initialise a git repository with a test identity and no commits.
pub fn init_repo(path: &Path) {
    git(path, &["init", "-q"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    git(path, &["config", "core.autocrlf", "false"]);
}

/// Initialise a git repository using `git2` only (no identity, no commits).
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Stage everything and commit it.
pub fn commit_all(path: &Path, message: &str) {
    git(path, &["add", "-A"]);
    git(path, &["commit", "-q", "-m", message]);
}

/// Path to the workspace's `test-fixtures/` directory.
pub fn fixtures_dir() -> PathBuf {
    // crates/hook-test-utils -> ../../test-fixtures
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

/// Turn `test-fixtures/hook-repo` into a git repository at `dest`, tagged
/// `tag`, and return its path for use as a `repo:` URL.
///
/// The manifest publishes `fix-trailing-space` (script), `say-hello`
/// (system, always runs) and `no-env-files` (fail).
pub fn hook_repo_fixture(dest: &Path, tag: &str) -> PathBuf {
    fs::create_dir_all(dest).unwrap();
    let source = fixtures_dir().join("hook-repo");
    for entry in fs::read_dir(&source).unwrap().flatten() {
        let target = dest.join(entry.file_name());
        fs::copy(entry.path(), &target).unwrap_or_else(|e| {
            panic!("hook_repo_fixture: failed to copy {}: {e}", entry.path().display())
        });
    }

    init_repo(dest);
    commit_all(dest, "Add hooks");
    git(dest, &["tag", tag]);
    dest.to_path_buf()
}
