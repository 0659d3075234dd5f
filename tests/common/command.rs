use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000"; // %Y-%m-%d %H:%M:%S %z
pub const AUTHOR_TIMESTAMP: &str = "1672574400 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn empty_repository_dir(repository_dir: TempDir) -> TempDir {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// A repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed once
#[fixture]
pub fn init_repository_dir(empty_repository_dir: TempDir) -> TempDir {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(
        dir.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_minigit_command(dir, &["add", "."]).assert().success();
    minigit_commit(dir, "Initial commit").assert().success();

    empty_repository_dir
}

/// Build a `minigit` invocation in `dir` with no identity leaking in from the caller
pub fn run_minigit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("minigit").expect("Failed to find minigit binary");
    cmd.current_dir(dir);
    cmd.env("HOME", dir.join(".home"));
    cmd.env_remove("GIT_AUTHOR_NAME");
    cmd.env_remove("GIT_AUTHOR_EMAIL");
    cmd.env_remove("GIT_AUTHOR_DATE");
    cmd.env_remove("MINIGIT_LOG");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn with_author(mut cmd: Command) -> Command {
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", AUTHOR_NAME),
        ("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("GIT_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd
}

pub fn minigit_commit(dir: &Path, message: &str) -> Command {
    with_author(run_minigit_command(dir, &["commit", "-m", message]))
}

/// Run a command expected to succeed and return its trimmed stdout
pub fn minigit_output(dir: &Path, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_minigit_command(dir, args).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    Ok(stdout.trim_end().to_string())
}

/// Get the current HEAD commit SHA
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_path = dir.join(".git").join("HEAD");
    let head_content = std::fs::read_to_string(head_path)?;

    // HEAD file contains either a commit SHA or a ref like "ref: refs/heads/main"
    if let Some(ref_path) = head_content.strip_prefix("ref: ") {
        let ref_file = dir.join(".git").join(ref_path.trim());
        let commit_sha = std::fs::read_to_string(ref_file)?;
        Ok(commit_sha.trim().to_string())
    } else {
        Ok(head_content.trim().to_string())
    }
}

/// Get the parent commit ID of a given commit by reading it back with `cat-file -p`
pub fn get_parent_commit_id(
    dir: &Path,
    commit_id: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let commit = minigit_output(dir, &["cat-file", "-p", commit_id])?;

    Ok(commit
        .lines()
        .find_map(|line| line.strip_prefix("parent "))
        .map(str::to_string))
}

/// Get the tree ID a commit points at
pub fn get_tree_id(dir: &Path, commit_id: &str) -> Result<String, Box<dyn std::error::Error>> {
    let commit = minigit_output(dir, &["cat-file", "-p", commit_id])?;

    commit
        .lines()
        .find_map(|line| line.strip_prefix("tree "))
        .map(str::to_string)
        .ok_or_else(|| "No tree found".into())
}
