use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builds and stores the tree graph of a working directory
///
/// Without a scope every eligible file is hashed and stored. With a scope only the staged paths
/// become entries, using their staged digests, and directories with no staged descendant are
/// pruned. Empty directories never produce an entry.
pub struct TreeBuilder<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
    scope: Option<&'r BTreeMap<PathBuf, ObjectId>>,
}

impl<'r> TreeBuilder<'r> {
    pub fn new(database: &'r Database, workspace: &'r Workspace) -> Self {
        TreeBuilder {
            database,
            workspace,
            scope: None,
        }
    }

    pub fn scoped(self, scope: &'r BTreeMap<PathBuf, ObjectId>) -> Self {
        TreeBuilder {
            scope: Some(scope),
            ..self
        }
    }

    /// Build the tree of the whole workspace
    ///
    /// Yields `None` when the root holds nothing to record; no object is stored in that case.
    pub fn build(&self) -> Result<Option<ObjectId>> {
        self.build_dir(Path::new(""))
    }

    fn build_dir(&self, dir: &Path) -> Result<Option<ObjectId>> {
        let mut tree = Tree::new();

        for child in self.workspace.list_dir(dir)? {
            let metadata = self.workspace.stat(&child)?;
            let file_type = metadata.file_type();
            let mode = EntryMode::from_metadata(&metadata);

            let oid = if file_type.is_dir() {
                if !self.has_scoped_descendant(&child) {
                    continue;
                }
                self.build_dir(&child)?
            } else if file_type.is_symlink() {
                self.file_oid(&child, || self.workspace.read_link(&child))?
            } else if file_type.is_file() {
                self.file_oid(&child, || self.workspace.read_file(&child))?
            } else {
                debug!(path = %child.display(), "skipping special file");
                None
            };

            if let Some(oid) = oid {
                tree.insert(Self::entry_name(&child)?, DatabaseEntry::new(oid, mode))?;
            }
        }

        if tree.is_empty() {
            return Ok(None);
        }

        let oid = self.database.store(&tree)?;
        debug!(%oid, dir = %dir.display(), entries = tree.len(), "stored tree");

        Ok(Some(oid))
    }

    fn file_oid(
        &self,
        path: &Path,
        read_content: impl FnOnce() -> Result<Bytes>,
    ) -> Result<Option<ObjectId>> {
        match self.scope {
            Some(scope) => Ok(scope.get(path).copied()),
            None => {
                let content = read_content()?;
                Ok(Some(self.database.write(ObjectType::Blob, &content)?))
            }
        }
    }

    /// Descendants of a path sort right after it, so one range lookup is enough
    fn has_scoped_descendant(&self, dir: &Path) -> bool {
        match self.scope {
            None => true,
            Some(scope) => scope
                .range(dir.to_path_buf()..)
                .next()
                .is_some_and(|(path, _)| path.starts_with(dir)),
        }
    }

    #[cfg(unix)]
    fn entry_name(path: &Path) -> Result<&[u8]> {
        use std::os::unix::ffi::OsStrExt;

        path.file_name()
            .map(|name| name.as_bytes())
            .ok_or_else(|| Error::InvalidArgument(format!("{} has no file name", path.display())))
    }

    #[cfg(not(unix))]
    fn entry_name(path: &Path) -> Result<&[u8]> {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(str::as_bytes)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("{} is not a valid UTF-8 file name", path.display()))
            })
    }
}
