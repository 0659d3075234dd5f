//! Working directory access
//!
//! Everything the repository reads from or writes to the user's files goes through here, so the
//! exclusion set is applied in exactly one place.

use crate::errors::{Error, IoContext, Result};
use bytes::Bytes;
use std::fs::Metadata;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Names never tracked, listed or removed, at any depth
pub const EXCLUDED_NAMES: [&str; 4] = [".git", "target", "build", ".DS_Store"];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether any component of `path` is in the exclusion set
    pub fn is_excluded(path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(name) => EXCLUDED_NAMES.contains(&name.to_string_lossy().as_ref()),
            _ => false,
        })
    }

    /// Resolve a user-supplied path to one relative to the workspace root
    ///
    /// The path must exist and lie inside the workspace. The root itself resolves to an empty path.
    pub fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };

        if std::fs::symlink_metadata(&absolute).is_err() {
            return Err(Error::InvalidArgument(format!(
                "pathspec '{}' did not match any files",
                path.display()
            )));
        }

        let normalized = Self::normalize(&absolute);
        if let Ok(relative) = normalized.strip_prefix(&self.path) {
            return Ok(relative.to_path_buf());
        }

        // the caller may have reached the workspace through a symlinked directory
        let canonical = absolute.canonicalize().at_path("resolve", &absolute)?;
        canonical
            .strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .map_err(|_| {
                Error::InvalidArgument(format!(
                    "{} is outside repository at {}",
                    path.display(),
                    self.path.display()
                ))
            })
    }

    fn normalize(path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                other => normalized.push(other.as_os_str()),
            }
        }
        normalized
    }

    /// Direct children of a directory, relative to the root, excluded names filtered out
    pub fn list_dir(&self, dir_path: &Path) -> Result<Vec<PathBuf>> {
        let absolute = self.path.join(dir_path);

        let mut children = std::fs::read_dir(&absolute)
            .at_path("list directory", &absolute)?
            .map(|entry| entry.map(|entry| dir_path.join(entry.file_name())))
            .collect::<std::io::Result<Vec<_>>>()
            .at_path("list directory", &absolute)?;
        children.retain(|child| !Self::is_excluded(child));
        children.sort();

        Ok(children)
    }

    /// Every file (and symlink) at or below `path`, relative to the root
    pub fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if Self::is_excluded(path) {
            return Ok(vec![]);
        }

        let absolute = self.path.join(path);
        let metadata = std::fs::symlink_metadata(&absolute).at_path("stat", &absolute)?;
        if !metadata.is_dir() {
            return Ok(vec![path.to_path_buf()]);
        }

        let root = self.path.as_ref();
        let mut files = Vec::new();
        for entry in WalkDir::new(&absolute)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .path()
                    .strip_prefix(root)
                    .map(|relative| !Self::is_excluded(relative))
                    .unwrap_or(false)
            })
        {
            let entry = entry.map_err(|e| {
                let context = format!("unable to walk {}", absolute.display());
                match e.into_io_error() {
                    Some(source) => Error::io(context, source),
                    None => Error::InvalidArgument(context),
                }
            })?;

            if entry.file_type().is_dir() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Metadata of a path without following symlinks
    pub fn stat(&self, path: &Path) -> Result<Metadata> {
        let absolute = self.path.join(path);
        std::fs::symlink_metadata(&absolute).at_path("stat", &absolute)
    }

    pub fn read_file(&self, path: &Path) -> Result<Bytes> {
        let absolute = self.path.join(path);
        std::fs::read(&absolute)
            .map(Bytes::from)
            .at_path("read", &absolute)
    }

    /// Content a symlink is stored as: the bytes of its target path
    pub fn read_link(&self, path: &Path) -> Result<Bytes> {
        let absolute = self.path.join(path);
        let target = std::fs::read_link(&absolute).at_path("read link", &absolute)?;

        Ok(Bytes::from(target.to_string_lossy().into_owned()))
    }

    /// Remove everything under the root apart from excluded entries
    ///
    /// Returns the number of top-level entries removed.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;

        for child in self.list_dir(Path::new(""))? {
            let absolute = self.path.join(&child);
            let metadata = std::fs::symlink_metadata(&absolute).at_path("stat", &absolute)?;

            if metadata.is_dir() {
                std::fs::remove_dir_all(&absolute).at_path("remove directory", &absolute)?;
            } else {
                std::fs::remove_file(&absolute).at_path("remove", &absolute)?;
            }
            removed += 1;
        }

        Ok(removed)
    }

    pub fn make_directory(&self, path: &Path) -> Result<()> {
        let absolute = self.path.join(path);

        if let Ok(metadata) = std::fs::symlink_metadata(&absolute)
            && !metadata.is_dir()
        {
            std::fs::remove_file(&absolute).at_path("remove", &absolute)?;
        }

        std::fs::create_dir_all(&absolute).at_path("create directory", &absolute)
    }

    /// Write a regular file, creating parent directories and replacing whatever was there
    pub fn write_file(&self, path: &Path, data: &[u8], permissions: u32) -> Result<()> {
        let absolute = self.prepare_destination(path)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&absolute)
            .at_path("open", &absolute)?;
        file.write_all(data).at_path("write", &absolute)?;

        Self::set_permissions(&absolute, permissions)
    }

    /// Recreate a symlink pointing at `target`
    pub fn write_symlink(&self, path: &Path, target: &[u8]) -> Result<()> {
        let absolute = self.prepare_destination(path)?;
        let target = PathBuf::from(String::from_utf8_lossy(target).into_owned());

        Self::symlink(&target, &absolute)
    }

    fn prepare_destination(&self, path: &Path) -> Result<PathBuf> {
        let absolute = self.path.join(path);

        if let Some(parent) = absolute.parent() {
            std::fs::create_dir_all(parent).at_path("create directory", parent)?;
        }

        if let Ok(metadata) = std::fs::symlink_metadata(&absolute) {
            if metadata.is_dir() {
                std::fs::remove_dir_all(&absolute).at_path("remove directory", &absolute)?;
            } else {
                std::fs::remove_file(&absolute).at_path("remove", &absolute)?;
            }
        }

        Ok(absolute)
    }

    #[cfg(unix)]
    fn set_permissions(path: &Path, permissions: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(permissions & 0o777))
            .at_path("set permissions on", path)
    }

    #[cfg(not(unix))]
    fn set_permissions(_path: &Path, _permissions: u32) -> Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn symlink(target: &Path, link: &Path) -> Result<()> {
        std::os::unix::fs::symlink(target, link).at_path("create symlink", link)
    }

    #[cfg(not(unix))]
    fn symlink(target: &Path, link: &Path) -> Result<()> {
        // no portable symlinks, keep the target path as file content
        std::fs::write(link, target.to_string_lossy().as_bytes()).at_path("write", link)
    }
}
