//! SHA-256 checksum utilities
//!
//! Hooks that rewrite files are detected by comparing checksums taken
//! before and after each hook runs. Checksums use the `sha256:<hex>` form.

use std::collections::BTreeMap;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
pub fn compute_content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}

/// Checksums for a set of files, keyed by the name the caller supplied.
///
/// Unreadable or missing files map to `None`, so a hook deleting a file
/// still shows up as a change.
pub fn snapshot<'a, I>(root: &Path, files: I) -> BTreeMap<String, Option<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    files
        .into_iter()
        .map(|name| {
            let checksum = compute_file_checksum(&root.join(name)).ok();
            (name.to_string(), checksum)
        })
        .collect()
}

/// Names whose checksum differs between two snapshots.
pub fn changed_files(
    before: &BTreeMap<String, Option<String>>,
    after: &BTreeMap<String, Option<String>>,
) -> Vec<String> {
    before
        .iter()
        .filter(|(name, checksum)| after.get(*name) != Some(*checksum))
        .map(|(name, _)| name.clone())
        .collect()
}
