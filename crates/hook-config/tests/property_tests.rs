use hook_config::schema::{HookEntry, HookFile, RepoEntry};
use hook_config::{Severity, validate};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn remote(repo: String, rev: String, ids: Vec<String>) -> RepoEntry {
    RepoEntry {
        repo,
        rev: Some(rev),
        hooks: ids.into_iter().map(HookEntry::new).collect(),
        unknown: BTreeMap::new(),
    }
}

proptest! {
    /// Distinct non-empty ids under pinned remote repos never produce errors.
    #[test]
    fn test_well_formed_configs_validate(
        urls in proptest::collection::vec("https://example\\.com/[a-z]{1,10}", 1..5),
        rev in "v[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}",
        ids in proptest::collection::btree_set("[a-z][a-z-]{0,12}", 1..6),
    ) {
        let ids: Vec<String> = ids.into_iter().collect();
        let file = HookFile {
            repos: urls
                .into_iter()
                .map(|url| remote(url, rev.clone(), ids.clone()))
                .collect(),
            ..HookFile::default()
        };
        let diagnostics = validate(&file);
        prop_assert!(
            diagnostics.iter().all(|d| d.severity != Severity::Error),
            "{:?}",
            diagnostics
        );
    }

    /// Repeating an id verbatim under one repo is always flagged.
    #[test]
    fn test_verbatim_duplicates_are_errors(id in "[a-z][a-z-]{0,12}") {
        let file = HookFile {
            repos: vec![remote(
                "https://example.com/hooks".to_string(),
                "v1.0.0".to_string(),
                vec![id.clone(), id],
            )],
            ..HookFile::default()
        };
        let diagnostics = validate(&file);
        prop_assert!(diagnostics.iter().any(|d| d.location == "repos[0].hooks[1].id"));
    }
}
