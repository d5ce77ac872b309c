pub use anyhow::{Error, Result};

pub mod chunk;
pub mod chunk_type;
pub mod commands;
pub mod png;
pub mod scan;
pub mod util;

pub use commands::{detect_and_extract, Options};
pub use png::Png;
pub use scan::{Detection, Payload};
