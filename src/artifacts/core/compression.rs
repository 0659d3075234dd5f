//! zlib compression for stored objects
//!
//! Objects are compressed whole before they hit the disk. Reading goes one of two ways:
//! - `decompress` inflates the whole file when the object must be parsed (trees, commits)
//! - `StreamDecoder` / `decompress_stream` inflate bounded chunks for the header-sniffing
//!   and content-printing paths, so the inflate state has to survive between reads

use crate::errors::{Error, Result};
use bytes::Bytes;
use flate2::{Decompress, FlushDecompress, Status};
use std::io::{Read, Write};

/// Size of the reads fed to the streaming decoder
pub const CHUNK_SIZE: usize = 16384;

pub fn compress(data: &[u8]) -> Result<Bytes> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(data)
        .map_err(|source| Error::io("unable to compress object content", source))?;

    encoder
        .finish()
        .map(Bytes::from)
        .map_err(|source| Error::io("unable to finish compressing object content", source))
}

pub fn decompress(data: &[u8]) -> Result<Bytes> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut decompressed_content = Vec::new();
    decoder
        .read_to_end(&mut decompressed_content)
        .map_err(|e| Error::Decompression(e.to_string()))?;

    Ok(decompressed_content.into())
}

/// Stateful inflater fed one chunk at a time
///
/// The underlying inflate context is kept between calls to `feed`, so a chunk may end in the
/// middle of a deflate block (or in the middle of the object header) without losing anything.
pub struct StreamDecoder {
    inflater: Decompress,
    output: Vec<u8>,
    finished: bool,
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDecoder {
    pub fn new() -> Self {
        StreamDecoder {
            inflater: Decompress::new(true),
            output: vec![0; CHUNK_SIZE],
            finished: false,
        }
    }

    /// Inflate `chunk`, returning every byte it produced.
    ///
    /// Input past the end of the zlib stream is ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        let mut produced = Vec::new();
        let mut input = chunk;

        while !self.finished {
            let before_in = self.inflater.total_in();
            let before_out = self.inflater.total_out();

            let status = self
                .inflater
                .decompress(input, &mut self.output, FlushDecompress::None)
                .map_err(|e| Error::Decompression(e.to_string()))?;

            let consumed = (self.inflater.total_in() - before_in) as usize;
            let written = (self.inflater.total_out() - before_out) as usize;
            produced.extend_from_slice(&self.output[..written]);
            input = &input[consumed..];

            match status {
                Status::StreamEnd => self.finished = true,
                Status::Ok | Status::BufError => {
                    // a full output buffer may still hide pending bytes, so only stop once the
                    // engine has nothing left to give for the input we have
                    let drained = written < self.output.len();
                    if (input.is_empty() && drained) || (consumed == 0 && written == 0) {
                        break;
                    }
                }
            }
        }

        Ok(produced)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fail unless the zlib stream reached its end marker.
    pub fn finish(&self) -> Result<()> {
        if self.finished {
            Ok(())
        } else {
            Err(Error::Decompression(
                "premature end of compressed stream".to_string(),
            ))
        }
    }
}

/// Lazy sequence of inflated chunks read from `source` in `CHUNK_SIZE` reads
pub struct DecompressStream<R> {
    source: R,
    decoder: StreamDecoder,
    buffer: Vec<u8>,
    done: bool,
}

pub fn decompress_stream<R: Read>(source: R) -> DecompressStream<R> {
    DecompressStream {
        source,
        decoder: StreamDecoder::new(),
        buffer: vec![0; CHUNK_SIZE],
        done: false,
    }
}

impl<R: Read> Iterator for DecompressStream<R> {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let read = match self.source.read(&mut self.buffer) {
                Ok(read) => read,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::io("unable to read compressed stream", e)));
                }
            };

            if read == 0 {
                self.done = true;
                return self.decoder.finish().err().map(Err);
            }

            match self.decoder.feed(&self.buffer[..read]) {
                Ok(produced) => {
                    self.done = self.decoder.is_finished();
                    if !produced.is_empty() {
                        return Some(Ok(Bytes::from(produced)));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        None
    }
}
