//! PNM (Portable Any Map) image format support
//!
//! Reads PGM and PPM in both ASCII (P2/P3) and binary (P5/P6) form, with
//! any maxval up to 65535. Samples are rescaled to 8 bits. Writes binary
//! P5 for gray rasters and P6 for RGB rasters.

use crate::{IoError, IoResult};
use glyphnorm_core::{PixelFormat, Raster};
use std::io::{BufRead, Read, Write};

/// Header of a PNM stream
#[derive(Debug, Clone, Copy)]
struct PnmHeader {
    format: PixelFormat,
    binary: bool,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Byte-level tokenizer that skips whitespace and `#` comments
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_space(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_space();
        let start = self.pos;
        while self
            .data
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'#')
        {
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.data[start..self.pos])
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        let token = self
            .next_token()
            .ok_or_else(|| IoError::InvalidData(format!("PNM: missing {}", what)))?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("PNM: bad {}", what)))
    }
}

fn read_header(tokens: &mut Tokens<'_>) -> IoResult<PnmHeader> {
    let (format, binary) = match tokens.next_token() {
        Some(b"P2") => (PixelFormat::Gray8, false),
        Some(b"P3") => (PixelFormat::Rgb24, false),
        Some(b"P5") => (PixelFormat::Gray8, true),
        Some(b"P6") => (PixelFormat::Rgb24, true),
        Some(other) => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {}",
                String::from_utf8_lossy(other)
            )));
        }
        None => return Err(IoError::InvalidData("PNM: empty stream".to_string())),
    };
    let width = tokens.next_u32("width")?;
    let height = tokens.next_u32("height")?;
    let maxval = tokens.next_u32("maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("PNM: maxval {} out of range", maxval)));
    }
    Ok(PnmHeader {
        format,
        binary,
        width,
        height,
        maxval,
    })
}

/// Rescale a sample in `0..=maxval` to `0..=255`, rounding to nearest.
#[inline]
fn rescale(v: u32, maxval: u32) -> IoResult<u8> {
    if v > maxval {
        return Err(IoError::InvalidData(format!(
            "PNM: sample {} exceeds maxval {}",
            v, maxval
        )));
    }
    Ok(((v * 255 + maxval / 2) / maxval) as u8)
}

/// Decode a PNM image from a byte slice.
pub fn read_pnm_mem(data: &[u8]) -> IoResult<Raster> {
    let mut tokens = Tokens::new(data);
    let header = read_header(&mut tokens)?;
    let too_large = || {
        IoError::InvalidData(format!(
            "PNM: {}x{} raster too large",
            header.width, header.height
        ))
    };
    let count = (header.width as usize)
        .checked_mul(header.height as usize)
        .and_then(|n| n.checked_mul(header.format.samples() as usize))
        .ok_or_else(too_large)?;

    let samples = if header.binary {
        // exactly one whitespace byte separates maxval from the raster
        let start = tokens.pos + 1;
        let wide = header.maxval > 255;
        let needed = if wide {
            count.checked_mul(2).ok_or_else(too_large)?
        } else {
            count
        };
        let body = data
            .get(start..)
            .filter(|rest| rest.len() >= needed)
            .map(|rest| &rest[..needed])
            .ok_or_else(|| IoError::InvalidData("PNM: truncated raster".to_string()))?;
        let mut samples = Vec::with_capacity(count);
        if wide {
            for pair in body.chunks_exact(2) {
                let v = u16::from_be_bytes([pair[0], pair[1]]) as u32;
                samples.push(rescale(v, header.maxval)?);
            }
        } else {
            for &b in body {
                samples.push(rescale(b as u32, header.maxval)?);
            }
        }
        samples
    } else {
        // every ASCII sample takes at least two bytes
        let mut samples = Vec::with_capacity(count.min(data.len() / 2));
        for _ in 0..count {
            let v = tokens.next_u32("sample")?;
            samples.push(rescale(v, header.maxval)?);
        }
        samples
    };

    Ok(Raster::from_samples(
        header.width,
        header.height,
        header.format,
        samples,
    )?)
}

/// Read a PNM image from a reader.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Raster> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    read_pnm_mem(&data)
}

/// Write a PNM image
///
/// Chooses P5 (grayscale) or P6 (RGB) by raster format, maxval 255.
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    let magic = match raster.format() {
        PixelFormat::Gray8 => "P5",
        PixelFormat::Rgb24 => "P6",
    };
    write!(writer, "{}\n{} {}\n255\n", magic, raster.width(), raster.height())?;
    writer.write_all(raster.data())?;
    writer.flush()?;
    Ok(())
}
