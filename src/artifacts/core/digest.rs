use crate::artifacts::objects::object_id::ObjectId;
use sha1::{Digest, Sha1};

/// SHA-1 of an encoded object, as a raw 20-byte object ID
pub fn digest(data: &[u8]) -> ObjectId {
    let hash = Sha1::digest(data);

    let mut raw = [0u8; 20];
    raw.copy_from_slice(&hash);
    ObjectId::from_bytes(raw)
}
