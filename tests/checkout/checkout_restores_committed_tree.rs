use crate::common::command::{
    get_head_commit_sha, get_parent_commit_id, init_repository_dir, minigit_commit,
    run_minigit_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_restores_committed_tree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));
    write_file(FileSpec::new(dir.join("a").join("new.txt"), "new".to_string()));
    std::fs::remove_file(dir.join("a").join("b").join("3.txt"))?;
    run_minigit_command(dir, &["add", "."]).assert().success();
    minigit_commit(dir, "Second commit").assert().success();

    let second = get_head_commit_sha(dir)?;
    let first = get_parent_commit_id(dir, &second)?.ok_or("second commit has no parent")?;

    run_minigit_command(dir, &["checkout", &first])
        .assert()
        .success()
        .stdout(predicate::str::is_match(format!(
            r"^HEAD is now at {} Initial commit\n$",
            &first[..7]
        ))?);

    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert_eq!(read_file(&dir.join("a").join("2.txt")), "two");
    assert_eq!(read_file(&dir.join("a").join("b").join("3.txt")), "three");
    assert!(!dir.join("a").join("new.txt").exists());

    // checkout moves neither the branch nor the history
    assert_eq!(get_head_commit_sha(dir)?, second);

    run_minigit_command(dir, &["checkout", &second])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "edited");
    assert_eq!(read_file(&dir.join("a").join("new.txt")), "new");
    assert!(!dir.join("a").join("b").exists());

    Ok(())
}

#[cfg(unix)]
#[rstest]
fn checkout_restores_executable_bits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    use crate::common::file::set_mode;
    use std::os::unix::fs::PermissionsExt;

    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("run.sh"), "#!/bin/sh\n".to_string()));
    set_mode(&dir.join("run.sh"), 0o755);
    run_minigit_command(dir, &["add", "run.sh"]).assert().success();
    minigit_commit(dir, "Add script").assert().success();
    let head = get_head_commit_sha(dir)?;

    std::fs::remove_file(dir.join("run.sh"))?;
    run_minigit_command(dir, &["checkout", &head])
        .assert()
        .success();

    let mode = std::fs::metadata(dir.join("run.sh"))?.permissions().mode() & 0o777;
    assert_eq!(mode & 0o111, 0o111);

    Ok(())
}
