use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Error;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// `-p`: the content, trees rendered as a listing
    Pretty,
    /// `-t`: the object type
    Type,
    /// `-s`: the declared payload size
    Size,
}

impl Repository {
    pub fn cat_file(&self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id)?;
        // only the header is inflated for -t and -s
        let header = self.database().read_header(&oid)?;

        match mode {
            CatFileMode::Type => writeln!(self.writer(), "{}", header.object_type)?,
            CatFileMode::Size => writeln!(self.writer(), "{}", header.size)?,
            CatFileMode::Pretty => match header.object_type {
                ObjectType::Tree => {
                    let tree = self
                        .database()
                        .parse_object_as_tree(&oid)?
                        .ok_or_else(|| Error::corrupt(format!("{} is not a tree", oid)))?;
                    if !tree.is_empty() {
                        writeln!(self.writer(), "{}", tree.display())?;
                    }
                }
                ObjectType::Blob | ObjectType::Commit => {
                    let mut writer = self.writer();
                    self.database().stream_payload(&oid, &mut **writer)?;
                }
            },
        }

        Ok(())
    }
}
