use crate::common;
use crate::common::command::{empty_repository_dir, minigit_output, with_author, run_minigit_command};
use crate::common::file::write_sample_tree;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_tree_entry_names(empty_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_sample_tree(dir);
    let tree_oid = minigit_output(dir, &["write-tree"])?;

    run_minigit_command(dir, &["ls-tree", "--name-only", &tree_oid])
        .assert()
        .success()
        .stdout("a.txt\nb\n");

    Ok(())
}

#[rstest]
fn list_tree_entries_in_full(empty_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_sample_tree(dir);
    let tree_oid = minigit_output(dir, &["write-tree"])?;

    run_minigit_command(dir, &["ls-tree", &tree_oid])
        .assert()
        .success()
        .stdout(format!(
            "100644 blob {}\ta.txt\n040000 tree {}\tb\n",
            common::SAMPLE_A_BLOB_OID,
            common::SAMPLE_B_TREE_OID
        ));

    run_minigit_command(dir, &["ls-tree", "--name-only", common::SAMPLE_B_TREE_OID])
        .assert()
        .success()
        .stdout("c.txt\n");

    Ok(())
}

#[rstest]
fn list_tree_of_a_commit(empty_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_sample_tree(dir);
    let tree_oid = minigit_output(dir, &["write-tree"])?;

    let output = with_author(run_minigit_command(
        dir,
        &["commit-tree", &tree_oid, "-m", "snapshot"],
    ))
    .assert()
    .success();
    let commit_oid = String::from_utf8(output.get_output().stdout.clone())?
        .trim()
        .to_string();

    assert_eq!(
        minigit_output(dir, &["ls-tree", "--name-only", &commit_oid])?,
        minigit_output(dir, &["ls-tree", "--name-only", &tree_oid])?
    );

    Ok(())
}
