//! Latin-1 text codec.
//!
//! Every byte `0..=255` maps to the `char` with the same scalar value and back.
//! Excalidraw relies on this to carry zlib output inside a JSON string, so
//! nothing here may go through a general-purpose text encoding.

use encoding_rs::mem::{decode_latin1, encode_latin1_lossy, is_str_latin1};

/// Decodes bytes as Latin-1. Never fails.
pub fn latin1_decode(bytes: &[u8]) -> String {
    decode_latin1(bytes).into_owned()
}

/// Encodes text as Latin-1, returning `None` if any code point is above 255.
pub fn latin1_encode(text: &str) -> Option<Vec<u8>> {
    if !is_str_latin1(text) {
        return None;
    }
    Some(encode_latin1_lossy(text).into_owned())
}
