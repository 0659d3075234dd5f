use crate::common::command::{
    get_head_commit_sha, init_repository_dir, minigit_output, run_minigit_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reinit_keeps_existing_history(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head_before = get_head_commit_sha(dir)?;
    let log_before = minigit_output(dir, &["log"])?;

    run_minigit_command(dir, &["init"]).assert().success();

    assert_eq!(
        std::fs::read_to_string(dir.join(".git/HEAD"))?,
        "ref: refs/heads/main\n"
    );
    assert_eq!(get_head_commit_sha(dir)?, head_before);
    assert_eq!(minigit_output(dir, &["log"])?, log_before);

    Ok(())
}
