//! `hookset clean`

use colored::Colorize;
use hook_git::RepoStore;

use crate::error::Result;

/// Delete the checkout store
pub fn run_clean(store: &RepoStore) -> Result<()> {
    let existed = store.root().exists();
    store.clean()?;

    if existed {
        println!(
            "{} Cleaned {}",
            "\u{2713}".green().bold(),
            store.root().display()
        );
    } else {
        println!(
            "{} Nothing to clean at {}",
            "note:".yellow().bold(),
            store.root().display()
        );
    }
    Ok(())
}
