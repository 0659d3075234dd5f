use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;

impl Repository {
    /// Commit an existing tree, optionally on top of `parent`, and advance the branch to it
    pub fn commit_tree(
        &self,
        tree: &str,
        parent: Option<&str>,
        message: &str,
    ) -> anyhow::Result<()> {
        let tree_oid = ObjectId::try_parse(tree)?;
        if self.database().parse_object_as_tree(&tree_oid)?.is_none() {
            return Err(Error::InvalidArgument(format!("{} is not a tree object", tree_oid)).into());
        }

        let parent = parent.map(ObjectId::try_parse).transpose()?;
        if let Some(parent) = &parent
            && self.database().parse_object_as_commit(parent)?.is_none()
        {
            return Err(Error::InvalidArgument(format!("{} is not a commit object", parent)).into());
        }

        let (commit_oid, _) = self.make_commit(tree_oid, parent, message)?;
        writeln!(self.writer(), "{}", commit_oid)?;

        Ok(())
    }
}
