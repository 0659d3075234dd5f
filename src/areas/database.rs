use crate::artifacts::core::compression::{self, CHUNK_SIZE, StreamDecoder};
use crate::artifacts::core::digest::digest;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable, encode_raw};
use crate::artifacts::objects::object_header::{HeaderScanner, ObjectHeader};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, IoContext, Result};
use bytes::Bytes;
use fake::rand;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Encode, hash, compress and persist a payload of the given type
    ///
    /// Writing a digest that is already present leaves the stored file untouched.
    pub fn write(&self, object_type: ObjectType, payload: &[u8]) -> Result<ObjectId> {
        let encoded = encode_raw(object_type, payload);
        let object_id = digest(&encoded);
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            debug!(oid = %object_id, %object_type, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::InvalidArgument(format!("invalid object path {}", object_path.display())))?;
        std::fs::create_dir_all(object_dir).at_path("create object directory", object_dir)?;

        self.write_object(&object_path, &encoded)?;
        debug!(oid = %object_id, %object_type, size = payload.len(), "stored object");

        Ok(object_id)
    }

    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let payload = object.serialize()?;
        self.write(object.object_type(), &payload)
    }

    /// Read an object whole, returning its type and payload
    pub fn read(&self, object_id: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let compressed = self.read_compressed(object_id)?;
        let decompressed = compression::decompress(&compressed)?;

        let (header, payload) = ObjectHeader::split(&decompressed)?;
        let payload = decompressed.slice_ref(payload);

        Ok((header.object_type, payload))
    }

    /// Read only as much of the object as is needed to decode its header
    pub fn read_header(&self, object_id: &ObjectId) -> Result<ObjectHeader> {
        let mut file = self.open_object(object_id)?;
        let mut decoder = StreamDecoder::new();
        let mut scanner = HeaderScanner::new();
        let mut buffer = vec![0; CHUNK_SIZE];

        loop {
            let read = file
                .read(&mut buffer)
                .at_path("read object", &self.object_path(object_id))?;
            if read == 0 {
                decoder.finish()?;
                return Err(Error::corrupt(format!("{} has no header", object_id)));
            }

            let produced = decoder.feed(&buffer[..read])?;
            if let Some((header, _)) = scanner.push(&produced)? {
                return Ok(header);
            }
        }
    }

    /// Stream an object's payload into `writer` chunk by chunk
    ///
    /// Fails with `CorruptObject` when the payload length disagrees with the header.
    pub fn stream_payload(&self, object_id: &ObjectId, writer: &mut dyn Write) -> Result<ObjectHeader> {
        let file = self.open_object(object_id)?;
        let mut scanner = HeaderScanner::new();
        let mut header = None;
        let mut written = 0;

        for chunk in compression::decompress_stream(file) {
            let chunk = chunk?;
            let payload = match header {
                Some(_) => &chunk[..],
                None => match scanner.push(&chunk)? {
                    Some((parsed, rest)) => {
                        header = Some(parsed);
                        rest
                    }
                    None => continue,
                },
            };

            writer
                .write_all(payload)
                .map_err(|source| Error::io("unable to write object content", source))?;
            written += payload.len();
        }

        let header = header.ok_or_else(|| Error::corrupt(format!("{} has no header", object_id)))?;
        if written != header.size {
            return Err(Error::corrupt(format!(
                "{} declares {} bytes but carries {}",
                header.object_type, header.size, written
            )));
        }

        Ok(header)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        let (object_type, payload) = self.read(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(payload.as_ref())?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(payload.as_ref())?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                payload.as_ref(),
            )?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Option<Blob>> {
        match self.read(object_id)? {
            (ObjectType::Blob, payload) => Ok(Some(Blob::deserialize(payload.as_ref())?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Option<Tree>> {
        match self.read(object_id)? {
            (ObjectType::Tree, payload) => Ok(Some(Tree::deserialize(payload.as_ref())?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Option<Commit>> {
        match self.read(object_id)? {
            (ObjectType::Commit, payload) => Ok(Some(Commit::deserialize(payload.as_ref())?)),
            _ => Ok(None),
        }
    }

    fn open_object(&self, object_id: &ObjectId) -> Result<File> {
        let object_path = self.object_path(object_id);

        File::open(&object_path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => Error::ObjectNotFound(*object_id),
            _ => Error::io_at("open object", &object_path, source),
        })
    }

    fn read_compressed(&self, object_id: &ObjectId) -> Result<Vec<u8>> {
        let mut file = self.open_object(object_id)?;
        let mut compressed = Vec::new();
        file.read_to_end(&mut compressed)
            .at_path("read object", &self.object_path(object_id))?;

        Ok(compressed)
    }

    fn write_object(&self, object_path: &Path, encoded: &[u8]) -> Result<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::InvalidArgument(format!("invalid object path {}", object_path.display())))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let compressed = compression::compress(encoded)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .at_path("open object file", &temp_object_path)?;
        file.write_all(&compressed)
            .at_path("write object file", &temp_object_path)?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).at_path("rename object file to", object_path)
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
