//! Classifier input vectors
//!
//! A normalized glyph is flattened row-major into floats in `[0, 1]`,
//! inverted so that background reads 0.0 and full ink reads 1.0. Only one
//! reference channel is sampled, [`REFERENCE_CHANNEL`]; gray rasters
//! supply their single sample for it.

use crate::normalize::NormalizedGlyph;
use crate::{RecogError, RecogResult};
use glyphnorm_core::color::BLUE;
use glyphnorm_core::{PixelFormat, Raster};

/// Channel sampled when converting RGB glyphs
pub const REFERENCE_CHANNEL: usize = BLUE;

/// Characters used by [`InputVector::to_ascii`], from background to ink
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// Flattened, inverted intensities of a glyph
#[derive(Debug, Clone, PartialEq)]
pub struct InputVector {
    values: Vec<f32>,
    width: u32,
    height: u32,
}

impl InputVector {
    /// Convert a raster, sampling [`REFERENCE_CHANNEL`].
    pub fn from_raster(raster: &Raster) -> Self {
        let (width, height) = raster.dimensions();
        let spp = raster.samples() as usize;
        let offset = match raster.format() {
            PixelFormat::Gray8 => 0,
            PixelFormat::Rgb24 => REFERENCE_CHANNEL,
        };
        let values = raster
            .data()
            .iter()
            .skip(offset)
            .step_by(spp)
            .map(|&b| (255 - b) as f32 / 255.0)
            .collect();
        Self {
            values,
            width,
            height,
        }
    }

    /// Convert the output raster of a normalization.
    pub fn from_glyph(glyph: &NormalizedGlyph) -> Self {
        Self::from_raster(&glyph.glyph)
    }

    /// Build a vector from raw values laid out row-major.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if the length is not
    /// `width * height` or a value lies outside `[0, 1]`.
    pub fn from_values(width: u32, height: u32, values: Vec<f32>) -> RecogResult<Self> {
        if values.len() != width as usize * height as usize {
            return Err(RecogError::InvalidParameter(format!(
                "{} values for a {}x{} vector",
                values.len(),
                width,
                height
            )));
        }
        if let Some(v) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(RecogError::InvalidParameter(format!(
                "value {} outside [0, 1]",
                v
            )));
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Value at column `x`, row `y`
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Render as text, one line per row, denser characters for more ink.
    pub fn to_ascii(&self) -> String {
        let last = (ASCII_RAMP.len() - 1) as f32;
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.values.chunks(self.width.max(1) as usize) {
            out.extend(
                row.iter()
                    .map(|&v| ASCII_RAMP[(v.clamp(0.0, 1.0) * last).round() as usize] as char),
            );
            out.push('\n');
        }
        out
    }

    /// Rebuild a gray raster, ink dark on a light background.
    pub fn to_raster(&self) -> RecogResult<Raster> {
        let data = self
            .values
            .iter()
            .map(|&v| 255 - (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect();
        Ok(Raster::from_samples(
            self.width,
            self.height,
            PixelFormat::Gray8,
            data,
        )?)
    }
}
