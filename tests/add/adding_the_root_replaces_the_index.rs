use crate::common::command::{empty_repository_dir, run_minigit_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_the_root_replaces_the_index(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    std::fs::write(dir.join("kept.txt"), "kept")?;
    std::fs::write(dir.join("deleted.txt"), "deleted")?;
    run_minigit_command(dir, &["add", "."]).assert().success();

    std::fs::remove_file(dir.join("deleted.txt"))?;
    run_minigit_command(dir, &["add", "."]).assert().success();

    let index = read_file(&dir.join(".git/index"));
    let paths = index
        .lines()
        .filter_map(|line| line.split_once(' ').map(|(path, _)| path))
        .collect::<Vec<_>>();
    assert_eq!(paths, vec!["kept.txt"]);

    Ok(())
}
