//! The `<type> <size>\0` prefix of every encoded object

use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};

/// Upper bound on the header length, "commit " plus a 20-digit size
const MAX_HEADER_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    pub size: usize,
}

impl ObjectHeader {
    pub fn new(object_type: ObjectType, size: usize) -> Self {
        ObjectHeader { object_type, size }
    }

    /// Header bytes including the terminating null
    pub fn encode(&self) -> Vec<u8> {
        format!("{} {}\0", self.object_type.as_str(), self.size).into_bytes()
    }

    /// Parse the header text, without the terminating null.
    pub fn parse(header: &[u8]) -> Result<Self> {
        let header = std::str::from_utf8(header)
            .map_err(|_| Error::corrupt("object header is not valid UTF-8"))?;
        let (object_type, size) = header
            .split_once(' ')
            .ok_or_else(|| Error::corrupt(format!("malformed object header {:?}", header)))?;

        let object_type = ObjectType::try_from(object_type)?;
        let size = size
            .parse::<usize>()
            .map_err(|_| Error::corrupt(format!("malformed object size {:?}", size)))?;

        Ok(ObjectHeader { object_type, size })
    }

    /// Split a fully decoded object into its header and payload, checking the declared size.
    pub fn split(data: &[u8]) -> Result<(Self, &[u8])> {
        let nul = data
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::corrupt("object header is not null-terminated"))?;

        let header = Self::parse(&data[..nul])?;
        let payload = &data[nul + 1..];
        if payload.len() != header.size {
            return Err(Error::corrupt(format!(
                "{} declares {} bytes but carries {}",
                header.object_type,
                header.size,
                payload.len()
            )));
        }

        Ok((header, payload))
    }
}

/// Accumulates inflated chunks until the header's null byte shows up
///
/// The header may straddle any number of chunk boundaries.
#[derive(Debug, Default)]
pub struct HeaderScanner {
    pending: Vec<u8>,
}

impl HeaderScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the next chunk; once the header is complete returns it with the payload bytes that
    /// followed it in this chunk.
    pub fn push<'c>(&mut self, chunk: &'c [u8]) -> Result<Option<(ObjectHeader, &'c [u8])>> {
        match chunk.iter().position(|&b| b == 0) {
            Some(nul) => {
                self.pending.extend_from_slice(&chunk[..nul]);
                let header = ObjectHeader::parse(&self.pending)?;
                Ok(Some((header, &chunk[nul + 1..])))
            }
            None => {
                self.pending.extend_from_slice(chunk);
                if self.pending.len() > MAX_HEADER_LENGTH {
                    return Err(Error::corrupt("object header is not null-terminated"));
                }
                Ok(None)
            }
        }
    }
}
