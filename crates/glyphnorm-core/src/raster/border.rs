//! Border operations for rasters
//!
//! Adding constant-color borders (padding) around an image, with a
//! different size per side.

use super::Raster;
use crate::color::Color;
use crate::error::{Error, Result};

impl Raster {
    /// Add a border with a different size per side.
    ///
    /// # Arguments
    ///
    /// * `left` - Left border width
    /// * `right` - Right border width
    /// * `top` - Top border height
    /// * `bot` - Bottom border height
    /// * `fill` - Border color
    ///
    /// # Returns
    ///
    /// New image with dimensions `(width + left + right, height + top + bot)`.
    ///
    /// # Errors
    ///
    /// Returns error if dimensions would overflow.
    pub fn add_border_general(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
        fill: Color,
    ) -> Result<Raster> {
        let (w, h) = self.dimensions();
        let overflow = || Error::InvalidParameter(format!(
            "border ({left}, {right}, {top}, {bot}) overflows {w}x{h} image"
        ));
        let new_w = w
            .checked_add(left)
            .and_then(|v| v.checked_add(right))
            .ok_or_else(overflow)?;
        let new_h = h
            .checked_add(top)
            .and_then(|v| v.checked_add(bot))
            .ok_or_else(overflow)?;

        let mut out = Raster::new_filled(new_w, new_h, self.format(), fill)?
            .try_into_mut()
            .unwrap_or_else(|r| r.to_mut());

        let first = (left * self.samples()) as usize;
        for y in 0..h {
            let src = self.row_data(y);
            out.row_data_mut(y + top)[first..first + src.len()].copy_from_slice(src);
        }

        Ok(out.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelFormat;

    #[test]
    fn test_add_border_general_places_source() {
        let raster = Raster::from_samples(2, 1, PixelFormat::Gray8, vec![1, 2]).unwrap();
        let padded = raster.add_border_general(1, 2, 1, 0, Color::WHITE).unwrap();
        assert_eq!(padded.dimensions(), (5, 2));
        assert_eq!(padded.row_data(0), &[255, 255, 255, 255, 255]);
        assert_eq!(padded.row_data(1), &[255, 1, 2, 255, 255]);
    }

    #[test]
    fn test_add_border_rgb_fill() {
        let raster = Raster::new(1, 1, PixelFormat::Rgb24).unwrap();
        let padded = raster.add_border_general(1, 1, 1, 1, Color::new(9, 8, 7)).unwrap();
        assert_eq!(padded.dimensions(), (3, 3));
        assert_eq!(padded.get_rgb(0, 0), Some(Color::new(9, 8, 7)));
        assert_eq!(padded.get_rgb(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_add_zero_border_is_copy() {
        let raster = Raster::from_samples(2, 2, PixelFormat::Gray8, vec![1, 2, 3, 4]).unwrap();
        let same = raster.add_border_general(0, 0, 0, 0, Color::WHITE).unwrap();
        assert_eq!(same.data(), raster.data());
    }

    #[test]
    fn test_add_border_overflow() {
        let raster = Raster::new(2, 2, PixelFormat::Gray8).unwrap();
        assert!(raster.add_border_general(u32::MAX, 0, 0, 0, Color::WHITE).is_err());
    }
}
