use crate::common::HELLO_BLOB_OID;
use crate::common::command::{empty_repository_dir, run_minigit_command};
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn listing_a_blob_fails(empty_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    empty_repository_dir.child("hello.txt").write_str("hello\n")?;
    run_minigit_command(empty_repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success();

    run_minigit_command(empty_repository_dir.path(), &["ls-tree", HELLO_BLOB_OID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a tree"));

    Ok(())
}
