//! End-to-end integration test for the vertical slice
//!
//! Exercises the complete flow: config discovery -> load and validate ->
//! resolve -> dispatch against staged files in a real git repository.

use std::fs;

use hook_config::sample::sample_config;
use hook_config::{Stage, find_config, load_config, parse_config, validate};
use hook_fs::NormalizedPath;
use hook_git::{GitRepo, RepoStore};
use hook_runner::{HookStatus, RunOptions, RunReport, Runner, resolve_hooks};
use hook_test_utils::git::fixtures_dir;
use hook_test_utils::repo::TestRepo;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// A repository configured with `test-fixtures/configs/local-and-meta.yaml`
fn setup_test_repo() -> TestRepo {
    let repo = TestRepo::new();
    let config = fs::read_to_string(fixtures_dir().join("configs/local-and-meta.yaml")).unwrap();
    repo.write_config(&config);
    repo.write_file(
        "scripts/todo.sh",
        "#!/bin/sh\n! grep -n TODO \"$@\"\n",
    );
    make_executable(&repo, "scripts/todo.sh");
    repo
}

fn make_executable(repo: &TestRepo, rel: &str) {
    hook_fs::io::make_executable(&NormalizedPath::new(repo.path().join(rel))).unwrap();
}

fn run_staged(repo: &TestRepo, stage: Stage) -> RunReport {
    let git = GitRepo::discover(repo.path()).unwrap();
    let config = load_config(&find_config(git.root()).unwrap()).unwrap();
    let store_dir = TempDir::new().unwrap();
    let store = RepoStore::new(store_dir.path());

    let hooks = resolve_hooks(&config, &store, git.root()).unwrap();
    let options = RunOptions {
        stage,
        ..RunOptions::default()
    };
    Runner::new(config, hooks, git.root(), options)
        .with_tracked_files(git.all_files().unwrap())
        .run(&git.staged_files().unwrap())
        .unwrap()
}

fn summary(report: &RunReport) -> Vec<(&str, HookStatus)> {
    report
        .outcomes
        .iter()
        .map(|o| (o.id.as_str(), o.status))
        .collect()
}

#[test]
fn test_sample_config_is_clean() {
    let origin = NormalizedPath::new(".pre-commit-config.yaml");
    let file = parse_config(sample_config(), &origin).unwrap();
    assert!(validate(&file).is_empty());
    assert_eq!(file.exclude.as_deref(), Some("(.*/env/.*)"));
    assert_eq!(file.repos.len(), 5);
}

#[test]
fn test_vertical_slice_all_hooks_pass() {
    let repo = setup_test_repo();
    repo.write_file("app.py", "def main():\n    return 1\n");
    repo.stage_all();

    let report = run_staged(&repo, Stage::PreCommit);
    assert_eq!(
        summary(&report),
        vec![
            ("no-tabs", HookStatus::Passed),
            ("check-hooks-apply", HookStatus::Passed),
            ("check-useless-excludes", HookStatus::Passed),
        ]
    );
    assert!(report.passed());
}

#[test]
fn test_vertical_slice_fail_fast_from_config() {
    let repo = setup_test_repo();
    repo.write_file("app.py", "def main():\n\treturn 1\n");
    repo.stage_all();

    let report = run_staged(&repo, Stage::PreCommit);
    assert_eq!(summary(&report), vec![("no-tabs", HookStatus::Failed)]);
    assert!(report.stopped_early);
    assert!(report.outcomes[0].output.contains("2:"));
}

#[test]
fn test_vertical_slice_only_staged_files_are_checked() {
    let repo = setup_test_repo();
    repo.stage_all();
    repo.commit_all("Initial");

    // Tabbed but never staged
    repo.write_file("scratch.py", "\tx = 1\n");
    repo.write_file("app.py", "x = 1\n");
    repo.stage(&["app.py"]);

    let report = run_staged(&repo, Stage::PreCommit);
    assert_eq!(report.outcomes[0].id, "no-tabs");
    assert_eq!(report.outcomes[0].status, HookStatus::Passed);
    assert_eq!(report.outcomes[0].file_count, 1);
}

#[test]
fn test_vertical_slice_manual_stage_runs_script() {
    let repo = setup_test_repo();
    repo.write_file("app.py", "x = 1  # TODO\n");
    repo.stage_all();

    let report = run_staged(&repo, Stage::Manual);
    assert_eq!(summary(&report), vec![("todo-check", HookStatus::Failed)]);
    assert!(report.outcomes[0].output.contains("TODO"));
}
