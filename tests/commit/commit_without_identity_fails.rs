use crate::common::command::{empty_repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_without_identity_fails(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    std::fs::write(dir.join("file.txt"), "content").expect("Failed to write file");
    run_minigit_command(dir, &["add", "."]).assert().success();

    run_minigit_command(dir, &["commit", "-m", "anonymous"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("author identity"));

    assert!(!dir.join(".git/refs/heads/main").exists());
}

#[rstest]
fn commit_with_only_a_name_fails(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    std::fs::write(dir.join("file.txt"), "content").expect("Failed to write file");
    run_minigit_command(dir, &["add", "."]).assert().success();

    run_minigit_command(dir, &["commit", "-m", "half known"])
        .env("GIT_AUTHOR_NAME", "someone")
        .assert()
        .failure();
}
