use anyhow::bail;
use log::trace;

use crate::chunk::{Chunk, ChunkRef};
use crate::chunk_type::ChunkType;
use crate::{Error, Result};

/// A PNG file held in memory.
///
/// Only the signature is checked up front. Chunks are walked lazily by
/// [`Png::chunks`], which trusts declared lengths and never verifies CRCs.
#[derive(Debug, Clone, Copy)]
pub struct Png<'a> {
    bytes: &'a [u8],
}

impl<'a> Png<'a> {
    pub const STANDARD_HEADER: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    pub fn is_png(bytes: &[u8]) -> bool {
        bytes.starts_with(&Png::STANDARD_HEADER)
    }

    /// Walks the chunks from just after the signature. Each call starts over.
    pub fn chunks(&self) -> Chunks<'a> {
        Chunks {
            bytes: self.bytes,
            offset: Png::STANDARD_HEADER.len(),
        }
    }

    /// Assembles a complete file from the signature and `chunks`.
    pub fn encode(chunks: &[Chunk]) -> Vec<u8> {
        Png::STANDARD_HEADER
            .iter()
            .copied()
            .chain(chunks.iter().flat_map(Chunk::as_bytes))
            .collect()
    }
}

impl<'a> TryFrom<&'a [u8]> for Png<'a> {
    type Error = Error;

    fn try_from(bytes: &'a [u8]) -> Result<Self> {
        if !Png::is_png(bytes) {
            bail!("not a valid PNG file")
        }
        Ok(Self { bytes })
    }
}

/// Iterator over the chunks of a [`Png`].
///
/// Stops once fewer than 8 bytes remain. A length running past the end of the
/// buffer is clamped to what is there.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = ChunkRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.bytes.get(self.offset..)?;
        if rest.len() < Chunk::HEADER_BYTES {
            return None;
        }

        let (length, rest) = rest.split_at(Chunk::DATA_LENGTH_BYTES);
        let length = u32::from_be_bytes([length[0], length[1], length[2], length[3]]) as usize;
        let (tag, rest) = rest.split_at(Chunk::CHUNK_TYPE_BYTES);
        let chunk_type = ChunkType::from([tag[0], tag[1], tag[2], tag[3]]);
        let data = &rest[..length.min(rest.len())];

        let chunk = ChunkRef {
            offset: self.offset,
            chunk_type,
            data,
        };
        trace!(
            "chunk {} at offset {}: declared {} bytes, read {}",
            chunk_type,
            self.offset,
            length,
            data.len()
        );

        self.offset = self
            .offset
            .saturating_add(Chunk::METADATA_BYTES)
            .saturating_add(length);
        Some(chunk)
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}
