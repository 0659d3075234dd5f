use crate::common;
use crate::common::command::{empty_repository_dir, minigit_output};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn write_empty_workspace_tree(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();

    assert_eq!(minigit_output(dir, &["write-tree"])?, common::EMPTY_TREE_OID);
    assert_eq!(
        common::inflate_object(dir, common::EMPTY_TREE_OID),
        b"tree 0\0".to_vec()
    );

    Ok(())
}
