use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

impl Repository {
    pub fn add(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        self.stage(paths)?;

        Ok(())
    }

    /// Store the blobs for `paths` (directories expanded) and record them in the index
    ///
    /// Staging the repository root replaces the whole index; anything else merges into it. Every
    /// path is resolved before the index is touched, so a bad path changes nothing.
    pub fn stage(&self, paths: &[PathBuf]) -> Result<usize> {
        let relative_paths = paths
            .iter()
            .map(|path| self.workspace().relative_path(path))
            .collect::<Result<Vec<_>>>()?;
        let full_restage = relative_paths
            .iter()
            .any(|path| path.as_os_str().is_empty());

        let files = relative_paths
            .iter()
            .map(|path| self.workspace().list_files(path))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect::<BTreeSet<_>>();

        let mut index = self.index();
        index.rehydrate()?;
        if full_restage {
            index.clear();
        }

        for path in &files {
            let blob_oid = self.store_file_blob(path)?;
            index.add(IndexEntry::new(path.clone(), blob_oid));
        }

        index.write_updates()?;
        info!(staged = files.len(), full_restage, entries = index.len(), "updated index");

        Ok(files.len())
    }

    fn store_file_blob(&self, path: &Path) -> Result<ObjectId> {
        let content = if self.workspace().stat(path)?.file_type().is_symlink() {
            self.workspace().read_link(path)?
        } else {
            self.workspace().read_file(path)?
        };

        self.database().write(ObjectType::Blob, &content)
    }
}
