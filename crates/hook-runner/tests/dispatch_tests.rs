//! End-to-end dispatch against real processes and a local hook repository

use hook_config::{HookFile, Stage};
use hook_git::RepoStore;
use hook_runner::{Error, HookStatus, RunOptions, RunReport, Runner, resolve_hooks};
use hook_test_utils::git::hook_repo_fixture;
use hook_test_utils::repo::TestRepo;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

fn files(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn runner(repo: &TestRepo, store: &TempDir, yaml: &str, options: RunOptions) -> Runner {
    let config: HookFile = serde_yaml::from_str(yaml).unwrap();
    let store = RepoStore::new(store.path().join("store"));
    let hooks = resolve_hooks(&config, &store, repo.path()).unwrap();
    Runner::new(config, hooks, repo.path(), options)
}

fn run(repo: &TestRepo, yaml: &str, names: &[&str]) -> RunReport {
    let store = TempDir::new().unwrap();
    runner(repo, &store, yaml, RunOptions::default())
        .run(&files(names))
        .unwrap()
}

const NO_TODO: &str = r#"
repos:
  - repo: local
    hooks:
      - id: no-todo
        name: no TODO markers
        entry: sh -c '! grep -n TODO "$@"' --
        language: system
        files: \.py$
"#;

#[test]
fn test_clean_file_passes() {
    let repo = TestRepo::new();
    repo.write_file("app.py", "x = 1\n");

    let report = run(&repo, NO_TODO, &["app.py"]);
    assert!(report.passed());
    assert_eq!(report.outcomes[0].status, HookStatus::Passed);
    assert_eq!(report.outcomes[0].file_count, 1);
    assert_eq!(report.outcomes[0].exit_code, Some(0));
}

#[test]
fn test_failing_hook_reports_output() {
    let repo = TestRepo::new();
    repo.write_file("app.py", "x = 1  # TODO remove\n");

    let report = run(&repo, NO_TODO, &["app.py"]);
    assert!(!report.passed());
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, HookStatus::Failed);
    assert!(outcome.output.contains("TODO remove"), "output: {}", outcome.output);
    assert!(outcome.modified_files.is_empty());
}

#[test]
fn test_hook_without_matching_files_is_skipped() {
    let repo = TestRepo::new();
    repo.write_file("README.md", "TODO\n");

    let report = run(&repo, NO_TODO, &["README.md"]);
    assert!(report.passed());
    assert_eq!(report.outcomes[0].status, HookStatus::Skipped);
    assert_eq!(report.outcomes[0].exit_code, None);
}

#[test]
fn test_global_exclude_applies_before_hooks() {
    let repo = TestRepo::new();
    repo.write_file("vendor/env/lib.py", "# TODO upstream\n");
    let yaml = format!("exclude: (.*/env/.*)\n{}", NO_TODO);

    let report = run(&repo, &yaml, &["vendor/env/lib.py"]);
    assert_eq!(report.outcomes[0].status, HookStatus::Skipped);
}

#[test]
fn test_fail_language_lists_files() {
    let repo = TestRepo::new();
    repo.write_file("config/.env", "SECRET=1\n");
    repo.write_file("app.py", "x = 1\n");

    let report = run(
        &repo,
        r#"
repos:
  - repo: local
    hooks:
      - id: no-env
        name: no env files
        entry: env files must not be committed
        language: fail
        files: (^|/)\.env$
"#,
        &["app.py", "config/.env"],
    );

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, HookStatus::Failed);
    assert_eq!(outcome.file_count, 1);
    assert_eq!(outcome.output, "env files must not be committed\n\nconfig/.env\n");
}

#[test]
fn test_remote_script_hook_modifying_files_fails() {
    let repo = TestRepo::new();
    repo.write_file("notes.txt", "trailing   \nclean\n");
    repo.write_file("clean.txt", "clean\n");

    let upstream_dir = TempDir::new().unwrap();
    let upstream = hook_repo_fixture(&upstream_dir.path().join("hooks"), "v1.0.0");
    let yaml = format!(
        "repos:\n  - repo: {}\n    rev: v1.0.0\n    hooks:\n      - id: fix-trailing-space\n",
        upstream.display()
    );

    let report = run(&repo, &yaml, &["clean.txt", "notes.txt"]);
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, HookStatus::Failed);
    assert_eq!(outcome.exit_code, Some(0));
    assert_eq!(outcome.modified_files, vec!["notes.txt"]);
    assert_eq!(repo.read_file("notes.txt"), "trailing\nclean\n");

    // Second run has nothing left to fix
    let report = run(&repo, &yaml, &["clean.txt", "notes.txt"]);
    assert!(report.passed());
}

#[test]
fn test_always_run_without_files() {
    let repo = TestRepo::new();
    let upstream_dir = TempDir::new().unwrap();
    let upstream = hook_repo_fixture(&upstream_dir.path().join("hooks"), "v1.0.0");
    let yaml = format!(
        "repos:\n  - repo: {}\n    rev: v1.0.0\n    hooks:\n      - id: say-hello\n",
        upstream.display()
    );

    let report = run(&repo, &yaml, &[]);
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, HookStatus::Passed);
    assert_eq!(outcome.output.trim(), "hello");
}

#[test]
fn test_unknown_manifest_hook_fails_resolution() {
    let repo = TestRepo::new();
    let upstream_dir = TempDir::new().unwrap();
    let upstream = hook_repo_fixture(&upstream_dir.path().join("hooks"), "v1.0.0");
    let yaml = format!(
        "repos:\n  - repo: {}\n    rev: v1.0.0\n    hooks:\n      - id: does-not-exist\n",
        upstream.display()
    );
    let config: HookFile = serde_yaml::from_str(&yaml).unwrap();
    let store = RepoStore::new(upstream_dir.path().join("store"));

    let err = resolve_hooks(&config, &store, repo.path()).unwrap_err();
    assert!(matches!(err, Error::HookNotFound { ref id, .. } if id == "does-not-exist"));
}

const TWO_FAILURES: &str = r#"
repos:
  - repo: local
    hooks:
      - id: first
        name: first
        entry: "false"
        language: system
      - id: second
        name: second
        entry: "false"
        language: system
"#;

#[rstest]
#[case(false, 2, false)]
#[case(true, 1, true)]
fn test_fail_fast(#[case] fail_fast: bool, #[case] ran: usize, #[case] stopped: bool) {
    let repo = TestRepo::new();
    repo.write_file("a.txt", "a\n");
    let store = TempDir::new().unwrap();
    let options = RunOptions {
        fail_fast,
        ..RunOptions::default()
    };

    let report = runner(&repo, &store, TWO_FAILURES, options)
        .run(&files(&["a.txt"]))
        .unwrap();
    assert_eq!(report.outcomes.len(), ran);
    assert_eq!(report.stopped_early, stopped);
}

#[test]
fn test_config_fail_fast() {
    let repo = TestRepo::new();
    repo.write_file("a.txt", "a\n");
    let yaml = format!("fail_fast: true\n{}", TWO_FAILURES);

    let report = run(&repo, &yaml, &["a.txt"]);
    assert_eq!(report.outcomes.len(), 1);
    assert!(report.stopped_early);
}

const STAGED: &str = r#"
repos:
  - repo: local
    hooks:
      - id: quick
        name: quick
        entry: "true"
        language: system
      - id: slow
        alias: thorough
        name: slow
        entry: "true"
        language: system
        stages: [manual]
"#;

#[rstest]
#[case(Stage::PreCommit, None, vec!["quick"])]
#[case(Stage::Manual, None, vec!["slow"])]
#[case(Stage::Manual, Some("thorough"), vec!["slow"])]
#[case(Stage::PreCommit, Some("quick"), vec!["quick"])]
fn test_stage_and_selector(
    #[case] stage: Stage,
    #[case] hook: Option<&str>,
    #[case] expected: Vec<&str>,
) {
    let repo = TestRepo::new();
    repo.write_file("a.txt", "a\n");
    let store = TempDir::new().unwrap();
    let options = RunOptions {
        stage,
        hook: hook.map(str::to_string),
        fail_fast: false,
    };

    let report = runner(&repo, &store, STAGED, options)
        .run(&files(&["a.txt"]))
        .unwrap();
    let ids: Vec<&str> = report.outcomes.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_selector_outside_stage_is_unknown() {
    let repo = TestRepo::new();
    let store = TempDir::new().unwrap();
    let options = RunOptions {
        hook: Some("slow".to_string()),
        ..RunOptions::default()
    };

    let err = runner(&repo, &store, STAGED, options).run(&[]).unwrap_err();
    assert!(matches!(err, Error::UnknownHook { ref selector } if selector == "slow"));
}

const FIX_THEN_PYTHON: &str = r#"
repos:
  - repo: local
    hooks:
      - id: strip-spaces
        name: strip spaces
        entry: sed -i -e 's/ *$//'
        language: system
        files: \.py$
      - id: black
        name: black
        entry: black
        language: python
      - id: no-todo
        name: no TODO markers
        entry: sh -c '! grep -n TODO "$@"' --
        language: system
        files: \.py$
"#;

#[test]
fn test_unsupported_language_is_a_failed_outcome() {
    let repo = TestRepo::new();
    repo.write_file("app.py", "x = 1   \n");

    let report = run(&repo, FIX_THEN_PYTHON, &["app.py"]);
    assert_eq!(repo.read_file("app.py"), "x = 1\n");

    let statuses: Vec<_> = report.outcomes.iter().map(|o| (o.id.as_str(), o.status)).collect();
    assert_eq!(
        statuses,
        vec![
            ("strip-spaces", HookStatus::Failed),
            ("black", HookStatus::Failed),
            ("no-todo", HookStatus::Passed),
        ]
    );
    assert_eq!(report.outcomes[0].modified_files, vec!["app.py"]);

    let black = &report.outcomes[1];
    assert_eq!(black.exit_code, None);
    assert!(black.output.contains("language 'python'"));
    assert!(!report.stopped_early);
}

#[test]
fn test_unsupported_language_stops_with_fail_fast() {
    let repo = TestRepo::new();
    repo.write_file("app.py", "x = 1\n");
    let store = TempDir::new().unwrap();

    let report = runner(
        &repo,
        &store,
        FIX_THEN_PYTHON,
        RunOptions {
            fail_fast: true,
            ..RunOptions::default()
        },
    )
    .run(&files(&["app.py"]))
    .unwrap();

    let ids: Vec<_> = report.outcomes.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["strip-spaces", "black"]);
    assert_eq!(report.outcomes[0].status, HookStatus::Passed);
    assert!(report.stopped_early);
}

#[test]
fn test_missing_program_is_a_failed_outcome() {
    let repo = TestRepo::new();
    repo.write_file("app.py", "x = 1\n");

    let report = run(
        &repo,
        r#"
repos:
  - repo: local
    hooks:
      - id: ghost
        name: ghost
        entry: hookset-no-such-program
        language: system
"#,
        &["app.py"],
    );
    assert_eq!(report.outcomes[0].status, HookStatus::Failed);
    assert!(report.outcomes[0].output.contains("failed to start"));
}

#[test]
fn test_meta_check_hooks_apply() {
    let repo = TestRepo::new();
    repo.write_file("app.py", "x = 1\n");
    let config = r#"
repos:
  - repo: local
    hooks:
      - id: rust-only
        name: rust only
        entry: "true"
        language: system
        files: \.rs$
      - id: python-only
        name: python only
        entry: "true"
        language: system
        types: [python]
  - repo: meta
    hooks:
      - id: check-hooks-apply
"#;
    repo.write_config(config);

    let report = run(&repo, config, &[".pre-commit-config.yaml", "app.py"]);
    let meta = report.outcomes.iter().find(|o| o.id == "check-hooks-apply").unwrap();
    assert_eq!(meta.status, HookStatus::Failed);
    assert_eq!(meta.output, "rust-only does not apply to this repository\n");
}

#[test]
fn test_meta_check_useless_excludes() {
    let repo = TestRepo::new();
    repo.write_file("app.py", "x = 1\n");
    repo.write_file("build/gen.py", "x = 2\n");
    let config = r#"
exclude: ^docs/
repos:
  - repo: local
    hooks:
      - id: useful
        name: useful
        entry: "true"
        language: system
        exclude: ^build/
      - id: useless
        name: useless
        entry: "true"
        language: system
        files: \.py$
        exclude: \.pyc$
  - repo: meta
    hooks:
      - id: check-useless-excludes
"#;
    repo.write_config(config);

    let report = run(
        &repo,
        config,
        &[".pre-commit-config.yaml", "app.py", "build/gen.py"],
    );
    let meta = report
        .outcomes
        .iter()
        .find(|o| o.id == "check-useless-excludes")
        .unwrap();
    assert_eq!(meta.status, HookStatus::Failed);
    assert_eq!(
        meta.output,
        "The global exclude pattern '^docs/' does not match any files\n\
         The exclude pattern '\\.pyc$' for useless does not match any files\n"
    );
}

#[test]
fn test_meta_hooks_skip_when_config_untouched() {
    let repo = TestRepo::new();
    repo.write_file("app.py", "x = 1\n");

    let report = run(
        &repo,
        "repos:\n  - repo: meta\n    hooks:\n      - id: check-hooks-apply\n",
        &["app.py"],
    );
    assert_eq!(report.outcomes[0].status, HookStatus::Skipped);
}
