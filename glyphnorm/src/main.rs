//! glyphnorm CLI - normalize drawings into classifier input
//!
//! Reads each drawing, runs it through the recognizer and prints the
//! resulting 28x28 input vector as ASCII art or as raw values.

use anyhow::{Context as _, Result, bail};
use clap::{Parser, ValueEnum};
use glyphnorm::io::{ImageFormat, read_image, write_image};
use glyphnorm::recog::{InputVector, NormalizeOptions};
use glyphnorm::transform::ScaleMethod;
use glyphnorm::{Color, RecognitionOutcome, Recognizer, RecognizerConfig};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "glyphnorm",
    version,
    about = "Normalize freehand digit drawings into 28x28 classifier input",
    after_help = "EXAMPLES:\n  \
                  glyphnorm seven.png\n  \
                  glyphnorm --format values --output-dir out/ *.png\n  \
                  glyphnorm --background 240,240,230 --prescale 28 scan.pnm\n\n\
                  Set RUST_LOG=debug to trace bounds, scale factor and padding."
)]
struct Cli {
    /// Drawings to normalize (PNG or PNM)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Background color of the drawing surface, as R,G,B or #RRGGBB
    #[arg(long, default_value = "255,255,255")]
    background: Color,

    /// Longer side of the scaled glyph
    #[arg(long, default_value_t = 20)]
    inner_size: u32,

    /// Side of the square output canvas
    #[arg(long, default_value_t = 28)]
    canvas_size: u32,

    /// Pixels added around the detected ink before cropping
    #[arg(long, default_value_t = 1)]
    margin: u32,

    /// Scaling method: auto, area-map, linear or sampling
    #[arg(long, default_value = "auto")]
    method: ScaleMethod,

    /// Resize the whole drawing to N x N before detection
    #[arg(long, value_name = "N")]
    prescale: Option<u32>,

    /// Write scaled.png and final.png for every drawing into DIR
    #[arg(long, value_name = "DIR")]
    debug_dir: Option<PathBuf>,

    /// Write each normalized glyph as DIR/<name>.png
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// How to print the input vector
    #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// 28 lines of ASCII art
    Ascii,
    /// 28 lines of space-separated values
    Values,
}

impl Cli {
    fn config(&self) -> RecognizerConfig {
        let options = NormalizeOptions::new()
            .with_background(self.background)
            .with_inner_size(self.inner_size)
            .with_canvas_size(self.canvas_size)
            .with_margin(self.margin)
            .with_method(self.method)
            .with_prescale(self.prescale);
        let config = RecognizerConfig::new().with_options(options);
        match &self.debug_dir {
            Some(dir) => config.with_debug_dir(dir),
            None => config,
        }
    }
}

fn render(input: &InputVector, format: OutputFormat) -> String {
    match format {
        OutputFormat::Ascii => input.to_ascii(),
        OutputFormat::Values => {
            let mut out = String::new();
            for row in input.as_slice().chunks(input.width().max(1) as usize) {
                let line: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
                out.push_str(&line.join(" "));
                out.push('\n');
            }
            out
        }
    }
}

fn process(recognizer: &Recognizer, path: &Path, cli: &Cli) -> Result<()> {
    let drawing = read_image(path).with_context(|| format!("cannot read {}", path.display()))?;
    info!(
        path = %path.display(),
        width = drawing.width(),
        height = drawing.height(),
        "normalizing"
    );

    let outcome = recognizer.recognize(&drawing);
    println!("== {}", path.display());
    if let Some(input) = outcome.input() {
        print!("{}", render(input, cli.format));
        if let Some(dir) = &cli.output_dir {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "glyph".to_string());
            let out = dir.join(format!("{}.{}", stem, ImageFormat::Png.extension()));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
            write_image(&input.to_raster()?, &out, ImageFormat::Png)
                .with_context(|| format!("cannot write {}", out.display()))?;
        }
    }
    print!("{}", outcome.display_text());

    if let RecognitionOutcome::Failed(reason) = &outcome {
        bail!("{}: {}", path.display(), reason);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let recognizer = Recognizer::new(cli.config()).context("invalid configuration")?;

    let mut failed = 0usize;
    for path in &cli.inputs {
        if let Err(e) = process(&recognizer, path, &cli) {
            error!("{:#}", e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} drawings failed", failed, cli.inputs.len());
    }
    Ok(())
}
