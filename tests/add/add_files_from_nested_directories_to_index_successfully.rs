use crate::common;
use crate::common::command::{empty_repository_dir, run_minigit_command};
use crate::common::file::{FileSpec, read_file, write_file, write_sample_tree};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_files_from_nested_directories_to_index_successfully(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_sample_tree(dir);
    write_file(FileSpec::new(dir.join("target").join("out"), "skip".to_string()));

    run_minigit_command(dir, &["add", "."]).assert().success();

    assert_eq!(
        read_file(&dir.join(".git/index")),
        format!(
            "a.txt {}\nb/c.txt {}\n",
            common::SAMPLE_A_BLOB_OID,
            common::SAMPLE_C_BLOB_OID
        )
    );

    Ok(())
}

#[rstest]
fn add_a_directory_stages_its_files(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_sample_tree(dir);

    run_minigit_command(dir, &["add", "b"]).assert().success();

    assert_eq!(
        read_file(&dir.join(".git/index")),
        format!("b/c.txt {}\n", common::SAMPLE_C_BLOB_OID)
    );

    Ok(())
}
