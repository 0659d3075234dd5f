use crate::artifacts::core::digest::digest;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_header::ObjectHeader;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;
use std::io::BufRead;

/// Serialize the payload of an object (everything after the header)
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Deserialize an object from its payload; the header has already been consumed
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Canonical encoded form `<type> <size>\0<payload>`
    fn encode(&self) -> Result<Bytes> {
        let payload = self.serialize()?;
        Ok(encode_raw(self.object_type(), &payload))
    }

    fn object_id(&self) -> Result<ObjectId> {
        Ok(digest(&self.encode()?))
    }
}

pub fn encode_raw(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let mut encoded = ObjectHeader::new(object_type, payload.len()).encode();
    encoded.extend_from_slice(payload);

    Bytes::from(encoded)
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }
}
