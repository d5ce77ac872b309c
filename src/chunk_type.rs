use anyhow::bail;
use std::fmt::Display;
use std::str::FromStr;

use crate::util::latin1_decode;
use crate::{Error, Result};

/// Four-byte PNG chunk tag.
///
/// Tags read from a file are kept as-is; they are not required to be ASCII
/// letters since the walker never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType {
    bytes: [u8; 4],
}

impl ChunkType {
    pub fn bytes(&self) -> [u8; 4] {
        self.bytes
    }
}

impl From<[u8; 4]> for ChunkType {
    fn from(bytes: [u8; 4]) -> Self {
        Self { bytes }
    }
}

impl FromStr for ChunkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes: [u8; 4] = match s.as_bytes().try_into() {
            Ok(bytes) => bytes,
            Err(_) => bail!("chunk type must be 4 bytes, got {}", s.len()),
        };
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            bail!("chunk type [{}] must be ascii letters", s)
        }
        Ok(Self { bytes })
    }
}

impl Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", latin1_decode(&self.bytes))
    }
}
