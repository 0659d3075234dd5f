use crate::common::command::{
    AUTHOR_EMAIL, AUTHOR_NAME, AUTHOR_TIMESTAMP, get_head_commit_sha, get_parent_commit_id,
    init_repository_dir, minigit_commit, run_minigit_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

fn entry(oid: &str, message: &str) -> String {
    format!(
        "commit {} (HEAD -> main)\nAuthor: {} <{}>\nDate:   {}\n\n    {}\n\n",
        oid, AUTHOR_NAME, AUTHOR_EMAIL, AUTHOR_TIMESTAMP, message
    )
}

#[rstest]
fn show_single_commit(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;

    run_minigit_command(dir, &["log"])
        .assert()
        .success()
        .stdout(entry(&head, "Initial commit"));

    Ok(())
}

#[rstest]
fn show_commits_newest_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("4.txt"), "four".to_string()));
    run_minigit_command(dir, &["add", "4.txt"]).assert().success();
    minigit_commit(dir, "Second commit").assert().success();

    let second = get_head_commit_sha(dir)?;
    let first = get_parent_commit_id(dir, &second)?.ok_or("second commit has no parent")?;

    run_minigit_command(dir, &["log"])
        .assert()
        .success()
        .stdout(format!(
            "{}{}",
            entry(&second, "Second commit"),
            entry(&first, "Initial commit")
        ));

    Ok(())
}

#[rstest]
fn multi_line_messages_are_indented(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("4.txt"), "four".to_string()));
    run_minigit_command(dir, &["add", "."]).assert().success();
    minigit_commit(dir, "Subject\n\nBody line").assert().success();

    let head = get_head_commit_sha(dir)?;
    let output = run_minigit_command(dir, &["log"]).assert().success();
    let log = String::from_utf8(output.get_output().stdout.clone())?;

    assert!(log.starts_with(&format!(
        "commit {} (HEAD -> main)\nAuthor: {} <{}>\nDate:   {}\n\n    Subject\n    \n    Body line\n\n",
        head, AUTHOR_NAME, AUTHOR_EMAIL, AUTHOR_TIMESTAMP
    )));

    Ok(())
}
