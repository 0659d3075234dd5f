use crate::common::command::{
    get_head_commit_sha, get_tree_id, init_repository_dir, run_minigit_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_rejects_a_tree(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;
    let tree = get_tree_id(dir, &head)?;
    std::fs::write(dir.join("untracked.txt"), "untracked")?;

    run_minigit_command(dir, &["checkout", &tree])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a commit"));

    assert!(dir.join("untracked.txt").exists());

    Ok(())
}

#[rstest]
fn checkout_rejects_an_unknown_commit(init_repository_dir: TempDir) {
    run_minigit_command(
        init_repository_dir.path(),
        &["checkout", "0123456789abcdef0123456789abcdef01234567"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("object not found"));

    assert!(init_repository_dir.path().join("1.txt").exists());
}
