#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use excalidraw_extract::chunk::Chunk;
use excalidraw_extract::chunk_type::ChunkType;
use excalidraw_extract::scan::EXCALIDRAW_MIME;
use excalidraw_extract::util::{latin1_decode, latin1_encode};
use excalidraw_extract::Png;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde_json::{json, Value};

pub fn chunk(chunk_type: &str, data: impl Into<Vec<u8>>) -> Chunk {
    Chunk::new(ChunkType::from_str(chunk_type).unwrap(), data.into())
}

/// Excalidraw-style tEXt payload carrying `scene`.
pub fn scene_text(scene: &Value) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(scene.to_string().as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let meta = json!({
        "version": "1",
        "encoding": "bstring",
        "compressed": true,
        "encoded": latin1_decode(&compressed),
    });
    let mut data = format!("{}\0", EXCALIDRAW_MIME).into_bytes();
    data.extend(latin1_encode(&meta.to_string()).unwrap());
    data
}

/// A 1x1 image with `extra` inserted between IDAT and IEND.
pub fn png_with(extra: Vec<Chunk>) -> Vec<u8> {
    let ihdr = [0u8, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0];
    let idat = [
        0x78u8, 0x9c, 0x62, 0x60, 0x60, 0x60, 0x60, 0x00, 0x00, 0x00, 0x05, 0x00, 0x01,
    ];
    let mut chunks = vec![chunk("IHDR", ihdr), chunk("IDAT", idat)];
    chunks.extend(extra);
    chunks.push(chunk("IEND", Vec::new()));
    Png::encode(&chunks)
}

/// Appends a final chunk whose length field claims `extra` more bytes than
/// the file holds. No CRC follows the data.
pub fn append_cut_chunk(bytes: &mut Vec<u8>, chunk_type: &str, data: &[u8], extra: u32) {
    bytes.extend_from_slice(&(data.len() as u32 + extra).to_be_bytes());
    bytes.extend_from_slice(chunk_type.as_bytes());
    bytes.extend_from_slice(data);
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
