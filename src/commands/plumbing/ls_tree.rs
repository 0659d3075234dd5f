use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};

impl Repository {
    pub fn ls_tree(&self, object_id: &str, name_only: bool) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id)?;
        let tree = self.resolve_tree(&oid)?;

        if name_only {
            for (name, _) in tree.entries() {
                writeln!(self.writer(), "{}", Tree::display_name(name))?;
            }
        } else if !tree.is_empty() {
            writeln!(self.writer(), "{}", tree.display())?;
        }

        Ok(())
    }

    /// A tree digest as is, or the tree a commit points at
    fn resolve_tree(&self, oid: &ObjectId) -> Result<Tree> {
        match self.database().parse_object(oid)? {
            ObjectBox::Tree(tree) => Ok(*tree),
            ObjectBox::Commit(commit) => self
                .database()
                .parse_object_as_tree(commit.tree_oid())?
                .ok_or_else(|| {
                    Error::corrupt(format!("commit {} points at a non-tree {}", oid, commit.tree_oid()))
                }),
            ObjectBox::Blob(_) => Err(Error::InvalidArgument(format!("{} is not a tree object", oid))),
        }
    }
}
