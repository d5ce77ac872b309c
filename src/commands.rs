use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::{debug, info, LevelFilter};

use crate::png::Png;
use crate::scan::{find_payload, Detection, Payload};
use crate::Result;

#[derive(Parser)]
#[command(name = "excalidraw-extract")]
#[command(bin_name = "excalidraw-extract")]
#[command(author, version)]
#[command(about = "Detect or extract an embedded Excalidraw scene or SVG from a PNG")]
struct ExcalidrawExtract {
    /// Path to the PNG file
    png_file: PathBuf,
    /// Extract the embedded scene or SVG
    #[arg(long)]
    extract: bool,
    /// Custom output path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// What to do once a payload is found.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub extract: bool,
    pub output: Option<PathBuf>,
}

pub fn execute() -> Result<bool> {
    let command = ExcalidrawExtract::parse();

    let level = match command.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let options = Options {
        extract: command.extract,
        output: command.output,
    };
    detect_and_extract(&command.png_file, &options)
}

/// Looks for an embedded payload in `png_path`, writing it out if asked to.
///
/// Returns whether anything was found. A missing file, a file without the PNG
/// signature and a failed write are errors, reported once by the caller;
/// nothing found is `Ok(false)`.
pub fn detect_and_extract(png_path: &Path, options: &Options) -> Result<bool> {
    let content = std::fs::read(png_path)
        .with_context(|| format!("could not read {}", png_path.display()))?;
    debug!("read {} bytes from {}", content.len(), png_path.display());

    let png = Png::try_from(content.as_slice())
        .with_context(|| format!("{}", png_path.display()))?;

    let Some(Detection {
        chunk_type,
        offset,
        payload,
    }) = find_payload(&png)
    else {
        println!("❌ No embedded Excalidraw scene or SVG found.");
        return Ok(false);
    };

    println!("✅ Found embedded {} in chunk '{}'", payload.kind(), chunk_type);
    info!("{} chunk starts at offset {}", chunk_type, offset);

    if options.extract {
        let output_file = match &options.output {
            Some(output) => output.clone(),
            None => default_output_path(png_path, &payload),
        };
        write_payload(&output_file, &payload)?;
        match payload {
            Payload::Scene(_) => println!("📝 Scene extracted to: {}", output_file.display()),
            Payload::Svg(_) => println!("📝 SVG extracted to: {}", output_file.display()),
        }
    }

    Ok(true)
}

/// `<stem>.excalidraw.json` or `<stem>.embedded.svg`, in the working directory.
pub fn default_output_path(png_path: &Path, payload: &Payload) -> PathBuf {
    let stem = png_path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = match payload {
        Payload::Scene(_) => "excalidraw.json",
        Payload::Svg(_) => "embedded.svg",
    };
    PathBuf::from(format!("{}.{}", stem, extension))
}

fn write_payload(output_file: &Path, payload: &Payload) -> Result<()> {
    let file = File::create(output_file)
        .with_context(|| format!("could not create {}", output_file.display()))?;
    let mut writer = BufWriter::new(file);

    match payload {
        Payload::Scene(scene) => serde_json::to_writer_pretty(&mut writer, scene)?,
        Payload::Svg(svg) => writer.write_all(svg.as_bytes())?,
    }
    writer
        .flush()
        .with_context(|| format!("could not write {}", output_file.display()))?;
    debug!("wrote {}", output_file.display());

    Ok(())
}
