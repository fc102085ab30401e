//! Pixel access functions
//!
//! Getting and setting individual pixels. Grayscale pixels read back as
//! the equivalent 3-channel color `(g, g, g)`, so callers can treat both
//! formats uniformly; writing a color into a grayscale raster stores
//! `Color::to_gray()`.

use super::{PixelFormat, Raster, RasterData, RasterMut};
use crate::color::Color;
use crate::error::{Error, Result};

impl RasterData {
    #[inline]
    fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn rgb_at(&self, x: u32, y: u32) -> Color {
        let i = self.offset(x, y);
        match self.format {
            PixelFormat::Gray8 => Color::gray(self.data[i]),
            PixelFormat::Rgb24 => Color::new(self.data[i], self.data[i + 1], self.data[i + 2]),
        }
    }

    fn check(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        Ok(())
    }
}

impl Raster {
    /// Get the color at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Color> {
        self.inner
            .in_bounds(x, y)
            .then(|| self.inner.rgb_at(x, y))
    }

    /// Get the color at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> Color {
        self.inner.rgb_at(x, y)
    }
}

impl RasterMut {
    /// Get the color at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Color> {
        self.inner
            .in_bounds(x, y)
            .then(|| self.inner.rgb_at(x, y))
    }

    /// Set the color at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        self.inner.check(x, y)?;
        self.set_rgb_unchecked(x, y, color);
        Ok(())
    }

    /// Set the color at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_rgb_unchecked(&mut self, x: u32, y: u32, color: Color) {
        let i = self.inner.offset(x, y);
        match self.inner.format {
            PixelFormat::Gray8 => self.inner.data[i] = color.to_gray(),
            PixelFormat::Rgb24 => self.inner.data[i..i + 3].copy_from_slice(&color.channels()),
        }
    }

    /// Set a gray level at (x, y).
    ///
    /// RGB rasters receive `(v, v, v)`.
    pub fn set_gray(&mut self, x: u32, y: u32, v: u8) -> Result<()> {
        self.set_rgb(x, y, Color::gray(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_rgb() {
        let mut raster = Raster::new(3, 3, PixelFormat::Rgb24).unwrap().to_mut();
        raster.set_rgb(1, 2, Color::new(10, 20, 30)).unwrap();
        let raster: Raster = raster.into();
        assert_eq!(raster.get_rgb(1, 2), Some(Color::new(10, 20, 30)));
        assert_eq!(raster.get_rgb(3, 0), None);
    }

    #[test]
    fn test_gray_reads_as_equal_channels() {
        let mut raster = Raster::new(2, 2, PixelFormat::Gray8).unwrap().to_mut();
        raster.set_gray(0, 1, 42).unwrap();
        let raster: Raster = raster.into();
        assert_eq!(raster.get_rgb(0, 1), Some(Color::gray(42)));
    }

    #[test]
    fn test_gray_stores_luma_of_color() {
        let mut raster = Raster::new(1, 1, PixelFormat::Gray8).unwrap().to_mut();
        raster.set_rgb(0, 0, Color::new(30, 60, 90)).unwrap();
        assert_eq!(raster.get_rgb(0, 0), Some(Color::gray(60)));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut raster = Raster::new(2, 2, PixelFormat::Gray8).unwrap().to_mut();
        assert!(matches!(
            raster.set_gray(2, 0, 1),
            Err(Error::IndexOutOfBounds { index: 2, len: 2 })
        ));
        assert!(raster.set_gray(0, 5, 1).is_err());
    }
}
