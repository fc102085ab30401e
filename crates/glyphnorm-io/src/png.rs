//! PNG image format support
//!
//! Every PNG flavour is normalized on read: palettes and low bit depths
//! are expanded, 16-bit samples are stripped to 8 bits, and alpha is
//! composited over white. The result is always [`PixelFormat::Gray8`] or
//! [`PixelFormat::Rgb24`].

use crate::{IoError, IoResult};
use glyphnorm_core::{PixelFormat, Raster};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Composite sample `s` with coverage `a` over a white backdrop.
#[inline]
fn over_white(s: u8, a: u8) -> u8 {
    let (s, a) = (s as u32, a as u32);
    ((s * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth: {:?}",
            output_info.bit_depth
        )));
    }

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let (format, src_spp) = match output_info.color_type {
        ColorType::Grayscale => (PixelFormat::Gray8, 1),
        ColorType::GrayscaleAlpha => (PixelFormat::Gray8, 2),
        ColorType::Rgb => (PixelFormat::Rgb24, 3),
        ColorType::Rgba => (PixelFormat::Rgb24, 4),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG color type after expansion: {:?}",
                other
            )));
        }
    };

    let mut samples = Vec::with_capacity(width as usize * height as usize * format.samples() as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..y * bytes_per_row + width as usize * src_spp];
        match src_spp {
            1 | 3 => samples.extend_from_slice(row),
            2 => samples.extend(row.chunks_exact(2).map(|p| over_white(p[0], p[1]))),
            _ => {
                for p in row.chunks_exact(4) {
                    samples.extend(p[..3].iter().map(|&s| over_white(s, p[3])));
                }
            }
        }
    }

    Ok(Raster::from_samples(width, height, format, samples)?)
}

/// Write a PNG image
///
/// Gray rasters are written as 8-bit grayscale and RGB rasters as 8-bit
/// truecolor.
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let color_type = match raster.format() {
        PixelFormat::Gray8 => ColorType::Grayscale,
        PixelFormat::Rgb24 => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(raster.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
