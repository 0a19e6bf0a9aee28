//! Local store of hook repositories checked out at their pinned revisions
//!
//! ```text
//! $HOOKSET_HOME/
//!   repos/
//!     3f1c9a0e5b2d7c41/    # sha256(url + rev), first 16 hex digits
//!       .hookset-ready     # written last; checkouts without it are redone
//!       .pre-commit-hooks.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoff;
use git2::build::CheckoutBuilder;
use git2::{ErrorClass, Repository};
use hook_fs::checksum::compute_content_checksum;

use crate::{Error, Result};

/// Environment variable that overrides the store location
pub const HOME_ENV_VAR: &str = "HOOKSET_HOME";

const READY_MARKER: &str = ".hookset-ready";
const REPOS_DIR: &str = "repos";

/// Checkout cache rooted at a directory
#[derive(Debug, Clone)]
pub struct RepoStore {
    root: PathBuf,
}

impl RepoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store at `$HOOKSET_HOME`, else `<user cache dir>/hookset`.
    pub fn from_env() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(home)));
        }
        dirs::cache_dir()
            .map(|dir| Self::new(dir.join("hookset")))
            .ok_or(Error::NoCacheDir { var: HOME_ENV_VAR })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the checkout of `url` at `rev` lives, whether or not it exists yet
    pub fn checkout_dir(&self, url: &str, rev: &str) -> PathBuf {
        let checksum = compute_content_checksum(&format!("{}\n{}", url, rev));
        let hex = checksum.trim_start_matches("sha256:");
        self.root.join(REPOS_DIR).join(&hex[..16])
    }

    /// Whether a complete checkout of `url` at `rev` is present
    pub fn is_ready(&self, url: &str, rev: &str) -> bool {
        self.checkout_dir(url, rev).join(READY_MARKER).is_file()
    }

    /// Return the checkout of `url` at `rev`, cloning it first if needed.
    pub fn checkout(&self, url: &str, rev: &str) -> Result<PathBuf> {
        let dir = self.checkout_dir(url, rev);
        if self.is_ready(url, rev) {
            tracing::debug!(url, rev, dir = %dir.display(), "Reusing hook checkout");
            return Ok(dir);
        }

        let repos_dir = self.root.join(REPOS_DIR);
        fs::create_dir_all(&repos_dir).map_err(|e| hook_fs::Error::io(&repos_dir, e))?;

        let staging = repos_dir.join(format!(
            ".tmp-{}-{}",
            dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
            std::process::id()
        ));
        remove_dir_if_exists(&staging)?;

        tracing::info!(url, rev, "Cloning hook repository");
        let repo = clone_with_retry(url, &staging)?;
        if let Err(e) = checkout_rev(&repo, url, rev) {
            drop(repo);
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }
        drop(repo);

        let marker = staging.join(READY_MARKER);
        fs::write(&marker, format!("{}\n{}\n", url, rev))
            .map_err(|e| hook_fs::Error::io(&marker, e))?;

        remove_dir_if_exists(&dir)?;
        fs::rename(&staging, &dir).map_err(|e| hook_fs::Error::io(&dir, e))?;

        tracing::debug!(url, rev, dir = %dir.display(), "Hook checkout ready");
        Ok(dir)
    }

    /// Delete every checkout
    pub fn clean(&self) -> Result<()> {
        tracing::info!(root = %self.root.display(), "Removing hook store");
        remove_dir_if_exists(&self.root)
    }
}

fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| hook_fs::Error::io(dir, e))?;
    }
    Ok(())
}

/// Clone, retrying network-class failures with exponential backoff
fn clone_with_retry(url: &str, dest: &Path) -> Result<Repository> {
    let policy = ExponentialBackoff {
        initial_interval: Duration::from_millis(250),
        max_elapsed_time: Some(Duration::from_secs(30)),
        ..ExponentialBackoff::default()
    };

    let operation = || {
        // A failed attempt can leave a partial clone behind
        let _ = fs::remove_dir_all(dest);
        Repository::clone(url, dest).map_err(|e| {
            if is_transient(&e) {
                tracing::warn!(url, error = %e, "Clone failed, retrying");
                backoff::Error::transient(e)
            } else {
                backoff::Error::permanent(e)
            }
        })
    };

    backoff::retry(policy, operation).map_err(|e| {
        let err = match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        };
        Error::CloneFailed {
            url: url.to_string(),
            message: err.message().to_string(),
        }
    })
}

fn is_transient(e: &git2::Error) -> bool {
    matches!(
        e.class(),
        ErrorClass::Net | ErrorClass::Http | ErrorClass::Ssh | ErrorClass::Ssl
    )
}

/// Detach HEAD at `rev`, which may be a tag, a commit or a remote branch
fn checkout_rev(repo: &Repository, url: &str, rev: &str) -> Result<()> {
    let not_found = || Error::RevisionNotFound {
        url: url.to_string(),
        rev: rev.to_string(),
    };

    let object = repo
        .revparse_single(rev)
        .or_else(|_| repo.revparse_single(&format!("origin/{}", rev)))
        .map_err(|_| not_found())?;
    let commit = object.peel_to_commit().map_err(|_| not_found())?;

    let mut checkout = CheckoutBuilder::new();
    checkout.force();
    repo.checkout_tree(commit.as_object(), Some(&mut checkout))?;
    repo.set_head_detached(commit.id())?;

    tracing::debug!(url, rev, commit = %commit.id(), "Checked out hook revision");
    Ok(())
}
