//! Speculative probes for payloads embedded in chunk data.
//!
//! Both scanners run over arbitrary chunk bytes, most of which will not
//! match, so every failure collapses into `None` instead of an error.

use std::io::Read;

use flate2::read::ZlibDecoder;
use log::trace;
use serde_json::Value;

use crate::chunk_type::ChunkType;
use crate::png::Png;
use crate::util::{latin1_decode, latin1_encode};

/// Keyword Excalidraw writes in front of the scene metadata, NUL terminated.
pub const EXCALIDRAW_MIME: &str = "application/vnd.excalidraw+json";

const SVG_OPEN: &str = "<svg";
const SVG_CLOSE: &str = "</svg>";

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Scene(Value),
    Svg(String),
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Scene(_) => "Excalidraw scene",
            Payload::Svg(_) => "SVG",
        }
    }
}

/// First payload found in a file and the chunk that held it.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub chunk_type: ChunkType,
    pub offset: usize,
    pub payload: Payload,
}

/// Decodes an Excalidraw scene from chunk data.
///
/// The data is `application/vnd.excalidraw+json\0{...,"encoded":"..."}` where
/// `encoded` holds the zlib-compressed scene JSON, one byte per character.
pub fn scan_scene(data: &[u8]) -> Option<Value> {
    let text = latin1_decode(data);
    let meta = text.strip_prefix(EXCALIDRAW_MIME)?.strip_prefix('\0')?;

    let meta: Value = match serde_json::from_str(meta) {
        Ok(meta) => meta,
        Err(e) => {
            trace!("scene metadata is not JSON: {}", e);
            return None;
        }
    };
    let encoded = meta.get("encoded")?.as_str().filter(|s| !s.is_empty())?;
    let Some(compressed) = latin1_encode(encoded) else {
        trace!("encoded scene has characters above U+00FF");
        return None;
    };

    let mut decompressed = Vec::new();
    if let Err(e) = ZlibDecoder::new(compressed.as_slice()).read_to_end(&mut decompressed) {
        trace!("scene zlib stream is corrupt: {}", e);
        return None;
    }
    let decompressed = match String::from_utf8(decompressed) {
        Ok(s) => s,
        Err(e) => {
            trace!("decompressed scene is not UTF-8: {}", e);
            return None;
        }
    };
    match serde_json::from_str(&decompressed) {
        Ok(scene @ Value::Object(_)) => Some(scene),
        Ok(other) => {
            trace!("decompressed scene is not a JSON object: {}", other);
            None
        }
        Err(e) => {
            trace!("decompressed scene is not JSON: {}", e);
            None
        }
    }
}

/// Returns the span from the first `<svg` to the last `</svg>`, inclusive.
///
/// Several SVGs in one chunk come back as a single span, along with whatever
/// sits between them.
pub fn scan_svg(data: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(data).ok()?;
    let start = text.find(SVG_OPEN)?;
    let close = text.rfind(SVG_CLOSE)?;
    if close < start {
        return None;
    }
    Some(&text[start..close + SVG_CLOSE.len()])
}

/// Tries the scene probe, then the SVG probe, on one chunk.
pub fn scan_chunk(data: &[u8]) -> Option<Payload> {
    scan_scene(data)
        .map(Payload::Scene)
        .or_else(|| scan_svg(data).map(|svg| Payload::Svg(svg.to_string())))
}

/// Scans chunks in file order and stops at the first match.
pub fn find_payload(png: &Png<'_>) -> Option<Detection> {
    png.chunks().find_map(|chunk| {
        scan_chunk(chunk.data).map(|payload| Detection {
            chunk_type: chunk.chunk_type,
            offset: chunk.offset,
            payload,
        })
    })
}
