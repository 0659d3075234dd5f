use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::log::reflog_entry::ReflogEntry;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::snapshot::builder::TreeBuilder;
use crate::errors::{Error, Result};
use std::path::Path;
use tracing::info;

pub const DEFAULT_COMMIT_MESSAGE: &str = "Default commit message";

impl Repository {
    pub fn commit(&self, message: Option<&str>) -> anyhow::Result<()> {
        let message = message.unwrap_or(DEFAULT_COMMIT_MESSAGE);

        let index_path = self.index().path().to_path_buf();
        let (commit_oid, commit) = self.commit_index(&index_path, message)?;

        let branch = self.refs().current_branch()?;
        let is_root = if commit.is_root() { "(root-commit) " } else { "" };
        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            branch,
            is_root,
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }

    /// Commit the files staged in the index at `index_path` on top of the current branch
    ///
    /// Fails with `InvalidArgument` when nothing staged is left in the workspace.
    pub fn commit_index(&self, index_path: &Path, message: &str) -> Result<(ObjectId, Commit)> {
        let mut index = Index::new(index_path.to_path_buf().into_boxed_path());
        index.rehydrate()?;

        let tree_oid = TreeBuilder::new(self.database(), self.workspace())
            .scoped(index.scope())
            .build()?
            .ok_or_else(|| Error::InvalidArgument("nothing to commit".to_string()))?;
        let parent = self.refs().read_head()?;

        self.make_commit(tree_oid, parent, message)
    }

    /// Store a commit, point the current branch at it and prepend it to the reflog
    pub fn make_commit(
        &self,
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        message: &str,
    ) -> Result<(ObjectId, Commit)> {
        let identity = self.identity().resolve_identity()?;
        let author = Author::new(identity.name, identity.email, self.clock().now());

        let commit = Commit::new(
            parent,
            tree_oid,
            author.clone(),
            author.clone(),
            message.to_string(),
        );
        let commit_oid = self.database().store(&commit)?;

        self.refs().advance_ref(&commit_oid)?;
        self.refs().append_reflog(&ReflogEntry::new(
            commit_oid,
            self.refs().current_branch()?,
            author,
            message.to_string(),
        ))?;

        info!(oid = %commit_oid, tree = %tree_oid, root = commit.is_root(), "created commit");
        Ok((commit_oid, commit))
    }
}
