use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::snapshot::extractor::TreeExtractor;
use crate::errors::{Error, Result};
use tracing::info;

impl Repository {
    pub fn checkout(&self, target: &str) -> anyhow::Result<()> {
        let commit_oid = ObjectId::try_parse(target)?;
        let commit = match self.database().parse_object(&commit_oid)? {
            ObjectBox::Commit(commit) => *commit,
            other => {
                return Err(Error::InvalidArgument(format!(
                    "{} is a {}, not a commit",
                    commit_oid,
                    other.object_type()
                ))
                .into());
            }
        };

        self.checkout_commit(&commit)?;

        writeln!(
            self.writer(),
            "HEAD is now at {} {}",
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }

    /// Replace the working directory with the tree of `commit`
    ///
    /// Every object the tree needs is resolved before anything is removed.
    pub fn checkout_commit(&self, commit: &Commit) -> Result<usize> {
        let extractor = TreeExtractor::new(self.database());
        let plan = extractor.plan(commit.tree_oid())?;

        let removed = self.workspace().clear()?;
        info!(removed, "cleared working directory");

        extractor.apply(&plan, self.workspace())
    }
}
