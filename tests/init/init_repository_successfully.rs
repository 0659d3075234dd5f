use crate::common::command::{repository_dir, run_minigit_command};
use assert_fs::TempDir;
use assert_fs::prelude::PathChild;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = repository_dir.path().canonicalize()?.join(".git");

    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty Git repository in .+\.git\n$",
        )?)
        .stdout(predicate::str::contains(git_dir.display().to_string()));

    assert!(repository_dir.child(".git/objects").path().is_dir());
    assert!(repository_dir.child(".git/refs/heads").path().is_dir());
    assert_eq!(
        std::fs::read_to_string(repository_dir.child(".git/HEAD").path())?,
        "ref: refs/heads/main\n"
    );
    assert!(!repository_dir.child(".git/refs/heads/main").path().exists());

    Ok(())
}
