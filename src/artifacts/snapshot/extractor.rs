use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};

/// One path to materialise, relative to the destination root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub path: PathBuf,
    pub entry: DatabaseEntry,
}

/// Writes a stored tree graph out to a workspace
///
/// Trees are decoded on first use and kept by digest, so identical subtrees are read once.
/// Extraction is planned first: every referenced object is resolved before the destination is
/// touched.
pub struct TreeExtractor<'r> {
    database: &'r Database,
    trees: RefCell<HashMap<ObjectId, Rc<Tree>>>,
}

impl<'r> TreeExtractor<'r> {
    pub fn new(database: &'r Database) -> Self {
        TreeExtractor {
            database,
            trees: RefCell::new(HashMap::new()),
        }
    }

    fn tree(&self, oid: &ObjectId) -> Result<Option<Rc<Tree>>> {
        if let Some(tree) = self.trees.borrow().get(oid) {
            return Ok(Some(tree.clone()));
        }

        match self.database.parse_object_as_tree(oid)? {
            Some(tree) => {
                let tree = Rc::new(tree);
                self.trees.borrow_mut().insert(*oid, tree.clone());
                Ok(Some(tree))
            }
            None => Ok(None),
        }
    }

    /// Resolve every entry reachable from `oid`, directories before their content
    pub fn plan(&self, oid: &ObjectId) -> Result<Vec<PlannedEntry>> {
        let tree = self
            .tree(oid)?
            .ok_or_else(|| Error::InvalidArgument(format!("{} is not a tree", oid)))?;

        let mut plan = Vec::new();
        self.plan_tree(&tree, Path::new(""), &mut plan)?;

        Ok(plan)
    }

    fn plan_tree(&self, tree: &Tree, dir: &Path, plan: &mut Vec<PlannedEntry>) -> Result<()> {
        for (name, entry) in tree.entries() {
            let path = dir.join(Self::path_component(name)?);
            if Workspace::is_excluded(&path) {
                warn!(path = %path.display(), "skipping excluded entry");
                continue;
            }

            match entry.mode {
                EntryMode::Directory => {
                    let subtree = self.tree(&entry.oid)?.ok_or_else(|| {
                        Error::corrupt(format!("{} at {} is not a tree", entry.oid, path.display()))
                    })?;
                    plan.push(PlannedEntry {
                        path: path.clone(),
                        entry: *entry,
                    });
                    self.plan_tree(&subtree, &path, plan)?;
                }
                EntryMode::RegularFile(_) | EntryMode::Symlink => {
                    if !self.database.exists(&entry.oid) {
                        return Err(Error::ObjectNotFound(entry.oid));
                    }
                    plan.push(PlannedEntry {
                        path,
                        entry: *entry,
                    });
                }
                EntryMode::GitLink => {
                    warn!(path = %path.display(), oid = %entry.oid, "skipping submodule entry");
                }
            }
        }

        Ok(())
    }

    #[cfg(unix)]
    fn path_component(name: &[u8]) -> Result<&Path> {
        use std::os::unix::ffi::OsStrExt;

        Ok(Path::new(std::ffi::OsStr::from_bytes(name)))
    }

    #[cfg(not(unix))]
    fn path_component(name: &[u8]) -> Result<&Path> {
        std::str::from_utf8(name).map(Path::new).map_err(|_| {
            Error::corrupt(format!(
                "tree entry name {:?} is not valid UTF-8",
                Tree::display_name(name)
            ))
        })
    }

    /// Materialise a plan into `workspace`, returning the number of files written
    pub fn apply(&self, plan: &[PlannedEntry], workspace: &Workspace) -> Result<usize> {
        let mut written = 0;

        for planned in plan {
            match planned.entry.mode {
                EntryMode::Directory => workspace.make_directory(&planned.path)?,
                EntryMode::RegularFile(permissions) => {
                    let content = self.blob_content(&planned.entry.oid)?;
                    workspace.write_file(&planned.path, &content, permissions)?;
                    written += 1;
                }
                EntryMode::Symlink => {
                    let target = self.blob_content(&planned.entry.oid)?;
                    workspace.write_symlink(&planned.path, &target)?;
                    written += 1;
                }
                EntryMode::GitLink => {}
            }
        }

        debug!(files = written, root = %workspace.path().display(), "extracted tree");
        Ok(written)
    }

    /// Plan and materialise the tree `oid` into `workspace`
    pub fn extract(&self, oid: &ObjectId, workspace: &Workspace) -> Result<usize> {
        let plan = self.plan(oid)?;
        self.apply(&plan, workspace)
    }

    fn blob_content(&self, oid: &ObjectId) -> Result<bytes::Bytes> {
        self.database
            .parse_object_as_blob(oid)?
            .map(|blob| blob.into_content())
            .ok_or_else(|| Error::corrupt(format!("{} is not a blob", oid)))
    }
}
