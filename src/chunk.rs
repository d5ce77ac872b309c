use crc::{Algorithm, Crc};

use crate::chunk_type::ChunkType;

/// A chunk as yielded by [`Png::chunks`](crate::png::Png::chunks): a view into
/// the file buffer plus the offset of its length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRef<'a> {
    pub offset: usize,
    pub chunk_type: ChunkType,
    pub data: &'a [u8],
}

/// An owned chunk, used to assemble PNG files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    chunk_type: ChunkType,
    data: Vec<u8>,
}

impl Chunk {
    pub const DATA_LENGTH_BYTES: usize = 4;
    pub const CHUNK_TYPE_BYTES: usize = 4;
    pub const CRC_BYTES: usize = 4;
    pub const HEADER_BYTES: usize = Chunk::DATA_LENGTH_BYTES + Chunk::CHUNK_TYPE_BYTES;
    pub const METADATA_BYTES: usize = Chunk::HEADER_BYTES + Chunk::CRC_BYTES;
    pub const CRC_ALGORITHM: &'static Algorithm<u32> = &crc::CRC_32_ISO_HDLC;

    pub fn new(chunk_type: ChunkType, data: Vec<u8>) -> Self {
        Self { chunk_type, data }
    }

    pub fn length(&self) -> usize {
        self.data.len()
    }

    pub fn chunk_type(&self) -> &ChunkType {
        &self.chunk_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Serialises to length, tag, data and CRC-32 over tag and data.
    pub fn as_bytes(&self) -> Vec<u8> {
        let data_length = self.length() as u32;
        data_length
            .to_be_bytes()
            .iter()
            .chain(self.chunk_type.bytes().iter())
            .chain(self.data.iter())
            .chain(self.crc().to_be_bytes().iter())
            .copied()
            .collect()
    }

    pub fn crc(&self) -> u32 {
        let crc = Crc::<u32>::new(Chunk::CRC_ALGORITHM);
        let mut digest = crc.digest();
        digest.update(&self.chunk_type.bytes());
        digest.update(&self.data);
        digest.finalize()
    }
}

impl From<ChunkRef<'_>> for Chunk {
    fn from(chunk: ChunkRef<'_>) -> Self {
        Chunk::new(chunk.chunk_type, chunk.data.to_vec())
    }
}
