use crate::common::command::{
    empty_repository_dir, get_head_commit_sha, get_parent_commit_id, minigit_commit,
    run_minigit_command, with_author,
};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn first_commit_is_a_root_commit(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_generated_files(dir, 3);
    run_minigit_command(dir, &["add", "."]).assert().success();

    minigit_commit(dir, "Initial commit\n\nWith a body")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[main \(root-commit\) [0-9a-f]{7}\] Initial commit\n$",
        )?);

    let head = get_head_commit_sha(dir)?;
    assert_eq!(get_parent_commit_id(dir, &head)?, None);
    assert_eq!(
        std::fs::read_to_string(dir.join(".git/refs/heads/main"))?,
        format!("{}\n", head)
    );

    Ok(())
}

#[rstest]
fn commit_without_message_uses_the_default(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_generated_files(dir, 1);
    run_minigit_command(dir, &["add", "."]).assert().success();

    with_author(run_minigit_command(dir, &["commit"]))
        .assert()
        .success()
        .stdout(predicate::str::ends_with("] Default commit message\n"));

    Ok(())
}
