//! The repository hooks run in

use std::path::{Path, PathBuf};

use git2::{Delta, ErrorCode, Repository};

use crate::{Error, Result};

/// A git work tree opened for hook dispatch
pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    /// Find the work tree containing `path`.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::NotARepository {
                path: path.to_path_buf(),
            },
            _ => Error::Git(e),
        })?;

        let workdir = repo.workdir().ok_or_else(|| Error::BareRepository {
            path: repo.path().to_path_buf(),
        })?;
        let root = dunce::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf());

        tracing::debug!(root = %root.display(), "Opened git repository");
        Ok(Self { repo, root })
    }

    /// Root of the work tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory git reads hook scripts from.
    pub fn hooks_dir(&self) -> PathBuf {
        self.repo.path().join("hooks")
    }

    /// `core.hooksPath`, when configured.
    ///
    /// Git ignores `<git-dir>/hooks` while this is set.
    pub fn hooks_path_override(&self) -> Result<Option<String>> {
        let config = self.repo.config()?;
        match config.get_string("core.hooksPath") {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Paths staged for the next commit, relative to the root, sorted.
    ///
    /// Deleted paths are left out since there is nothing to check. On an
    /// unborn branch every index entry counts as staged.
    pub fn staged_files(&self) -> Result<Vec<String>> {
        let head_tree = match self.repo.head() {
            Ok(head) => Some(head.peel_to_tree()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e.into()),
        };

        let index = self.repo.index()?;
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;

        let mut files: Vec<String> = diff
            .deltas()
            .filter(|delta| {
                matches!(
                    delta.status(),
                    Delta::Added
                        | Delta::Modified
                        | Delta::Renamed
                        | Delta::Copied
                        | Delta::Typechange
                )
            })
            .filter_map(|delta| delta.new_file().path())
            .map(path_to_string)
            .collect();
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Every path tracked in the index, sorted.
    pub fn all_files(&self) -> Result<Vec<String>> {
        let index = self.repo.index()?;
        let mut files: Vec<String> = index
            .iter()
            .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
            .collect();
        files.sort();
        files.dedup();
        Ok(files)
    }
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
