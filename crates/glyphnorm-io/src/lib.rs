//! glyphnorm-io - Raster I/O
//!
//! Reading and writing rasters as PNG or PNM. Readers always produce
//! [`PixelFormat::Gray8`](glyphnorm_core::PixelFormat::Gray8) or
//! [`PixelFormat::Rgb24`](glyphnorm_core::PixelFormat::Rgb24) rasters,
//! so downstream stages never see palettes, alpha, or 16-bit samples.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | gray, gray+alpha, RGB, RGBA, palette, 1-16 bit | gray, RGB | `png-format` |
//! | PNM    | P2, P3, P5, P6 | P5, P6 | `pnm` |

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use glyphnorm_core::Raster;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path, detecting the format from its content.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from memory, detecting the format from its content.
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm_mem(data),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write an image to a file path in the given format.
///
/// An existing file at `path` is overwritten.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_to(raster, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory in the given format.
pub fn write_image_mem(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_to(raster, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_to<W: Write>(raster: &Raster, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(raster, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphnorm_core::PixelFormat;

    #[test]
    fn test_mem_roundtrip_both_formats() {
        let data: Vec<u8> = (0..12).map(|i| (i * 20) as u8).collect();
        let raster = Raster::from_samples(4, 3, PixelFormat::Gray8, data).unwrap();
        for format in [ImageFormat::Png, ImageFormat::Pnm] {
            let bytes = write_image_mem(&raster, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            let back = read_image_mem(&bytes).unwrap();
            assert_eq!(back.data(), raster.data());
        }
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_image("/nonexistent/glyphnorm/missing.png"),
            Err(IoError::Io(_))
        ));
    }
}
