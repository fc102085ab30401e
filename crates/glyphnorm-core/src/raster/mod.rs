//! Raster - The image container
//!
//! The `Raster` structure is the image type passed between pipeline
//! stages. It holds 8-bit samples, either one per pixel (grayscale)
//! or three per pixel (RGB), in row-major order without row padding.
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `RasterMut` via [`Raster::try_into_mut`]
//! or [`Raster::to_mut`], then convert back with `Into<Raster>`.
//! A stage that needs a private copy of its input calls
//! [`Raster::deep_clone`].

mod access;
mod border;
mod clip;
pub mod statistics;

use crate::color::Color;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Sample layout of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One 8-bit gray sample per pixel
    Gray8,
    /// Three 8-bit samples per pixel (R, G, B)
    Rgb24,
}

impl PixelFormat {
    /// Samples per pixel.
    #[inline]
    pub fn samples(self) -> u32 {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb24 => 3,
        }
    }
}

/// Internal raster data
#[derive(Debug)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Sample layout
    format: PixelFormat,
    /// Row-major samples, `width * height * samples` bytes
    data: Vec<u8>,
}

impl RasterData {
    fn duplicate(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            format: self.format,
            data: self.data.clone(),
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.format.samples() as usize
    }
}

/// Raster - Image container
///
/// # Examples
///
/// ```
/// use glyphnorm_core::{Raster, PixelFormat};
///
/// let raster = Raster::new(280, 280, PixelFormat::Gray8).unwrap();
/// assert_eq!(raster.width(), 280);
/// assert_eq!(raster.height(), 280);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with the specified dimensions and format.
    ///
    /// All samples are initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = Self::buffer_len(width, height, format)?;
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                format,
                data: vec![0u8; len],
            }),
        })
    }

    /// Create a new raster with every pixel set to `color`.
    ///
    /// Grayscale rasters store `color.to_gray()`.
    pub fn new_filled(width: u32, height: u32, format: PixelFormat, color: Color) -> Result<Self> {
        let mut raster = Self::new(width, height, format)?
            .try_into_mut()
            .unwrap_or_else(|r| r.to_mut());
        raster.fill(color);
        Ok(raster.into())
    }

    /// Wrap an existing row-major sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty geometry and
    /// [`Error::BufferLength`] if `data` has the wrong size.
    pub fn from_samples(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = Self::buffer_len(width, height, format)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                format,
                data,
            }),
        })
    }

    fn buffer_len(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.samples() as usize))
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the sample layout.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn samples(&self) -> u32 {
        self.inner.format.samples()
    }

    /// Get raw access to the sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of a single row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        let start = self.inner.offset(0, y);
        let end = start + (self.inner.width * self.samples()) as usize;
        &self.inner.data[start..end]
    }

    /// Get the number of strong references to this raster.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two rasters have the same width, height, and format.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.format == other.inner.format
    }

    /// Create a deep copy of this raster.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Raster {
            inner: Arc::new(self.inner.duplicate()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: self.inner.duplicate(),
        }
    }

    /// Convert to a grayscale raster.
    ///
    /// RGB pixels map to `Color::to_gray()`; grayscale input is shared.
    pub fn to_gray(&self) -> Raster {
        if self.format() == PixelFormat::Gray8 {
            return self.clone();
        }
        let data = self
            .inner
            .data
            .chunks_exact(3)
            .map(|px| Color::new(px[0], px[1], px[2]).to_gray())
            .collect();
        Raster {
            inner: Arc::new(RasterData {
                width: self.inner.width,
                height: self.inner.height,
                format: PixelFormat::Gray8,
                data,
            }),
        }
    }
}

/// Mutable raster
///
/// Allows modification of image data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the sample layout.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Get raw access to the sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the samples of a single row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u8] {
        let start = self.inner.offset(0, y);
        let end = start + (self.inner.width * self.inner.format.samples()) as usize;
        &mut self.inner.data[start..end]
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        match self.inner.format {
            PixelFormat::Gray8 => self.inner.data.fill(color.to_gray()),
            PixelFormat::Rgb24 => {
                for px in self.inner.data.chunks_exact_mut(3) {
                    px.copy_from_slice(&color.channels());
                }
            }
        }
    }
}

impl From<RasterMut> for Raster {
    fn from(raster: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster.inner),
        }
    }
}
