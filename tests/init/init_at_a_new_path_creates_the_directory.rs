use crate::common::command::{repository_dir, run_minigit_command};
use assert_fs::TempDir;
use assert_fs::prelude::PathChild;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_at_a_new_path_creates_the_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir.child("nested").child("project");

    run_minigit_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nested/project/.git"));

    assert!(target.child(".git/HEAD").path().is_file());
    assert!(!repository_dir.child(".git").path().exists());

    Ok(())
}
