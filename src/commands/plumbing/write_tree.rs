use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::snapshot::builder::TreeBuilder;
use crate::errors::Result;

impl Repository {
    pub fn write_tree(&self) -> anyhow::Result<()> {
        let tree_oid = self.store_workspace_tree()?;
        writeln!(self.writer(), "{}", tree_oid)?;

        Ok(())
    }

    /// Store every eligible file of the workspace, ignoring the index
    ///
    /// An empty workspace stores and returns the empty tree.
    pub fn store_workspace_tree(&self) -> Result<ObjectId> {
        match TreeBuilder::new(self.database(), self.workspace()).build()? {
            Some(tree_oid) => Ok(tree_oid),
            None => self.database().store(&Tree::new()),
        }
    }
}
