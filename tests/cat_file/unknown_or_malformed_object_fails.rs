use crate::common::command::{empty_repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case::unknown_object("0123456789abcdef0123456789abcdef01234567")]
#[case::short_digest("ce01362")]
#[case::not_hex("zz013625030ba8dba906f756967f9e9ca394464a")]
fn unknown_or_malformed_object_fails(empty_repository_dir: TempDir, #[case] object: &str) {
    run_minigit_command(empty_repository_dir.path(), &["cat-file", "-p", object])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
