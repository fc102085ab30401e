//! Rectangle clipping operations for rasters
//!
//! Functions for extracting rectangular sub-regions, either by origin and
//! size or by a pair of inclusive row / column [`Interval`]s.

use super::{Raster, RasterData};
use crate::error::{Error, Result};
use crate::interval::Interval;
use std::sync::Arc;

impl Raster {
    /// Extract a rectangular sub-region from the image.
    ///
    /// Creates a new image containing the specified rectangle. If the
    /// rectangle extends beyond the image bounds, it is clipped to the
    /// valid region.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The requested width or height is 0
    /// - The rectangle origin is outside the image bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphnorm_core::{Raster, PixelFormat};
    ///
    /// let raster = Raster::new(100, 80, PixelFormat::Gray8).unwrap();
    /// let clipped = raster.clip_rectangle(80, 60, 50, 50).unwrap();
    /// assert_eq!(clipped.width(), 20);   // clipped: 100 - 80
    /// assert_eq!(clipped.height(), 20);  // clipped: 80 - 60
    /// ```
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Raster> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle has zero dimension: {}x{}",
                w, h
            )));
        }

        let src_w = self.width();
        let src_h = self.height();

        if x >= src_w || y >= src_h {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle origin ({}, {}) is outside image bounds ({}x{})",
                x, y, src_w, src_h
            )));
        }

        let clip_w = w.min(src_w - x);
        let clip_h = h.min(src_h - y);

        let samples = self.samples() as usize;
        let span = clip_w as usize * samples;
        let first = x as usize * samples;
        let mut data = Vec::with_capacity(span * clip_h as usize);
        for dy in 0..clip_h {
            let row = self.row_data(y + dy);
            data.extend_from_slice(&row[first..first + span]);
        }

        Ok(Raster {
            inner: Arc::new(RasterData {
                width: clip_w,
                height: clip_h,
                format: self.format(),
                data,
            }),
        })
    }

    /// Extract the sub-image covered by inclusive row and column intervals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if either interval extends past
    /// the image.
    pub fn clip_intervals(&self, rows: Interval, cols: Interval) -> Result<Raster> {
        if rows.end() >= self.height() {
            return Err(Error::InvalidInterval {
                start: rows.start(),
                end: rows.end(),
                dimension: self.height(),
            });
        }
        if cols.end() >= self.width() {
            return Err(Error::InvalidInterval {
                start: cols.start(),
                end: cols.end(),
                dimension: self.width(),
            });
        }
        self.clip_rectangle(cols.start(), rows.start(), cols.len(), rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelFormat;

    fn ramp(w: u32, h: u32) -> Raster {
        let data = (0..w * h).map(|i| i as u8).collect();
        Raster::from_samples(w, h, PixelFormat::Gray8, data).unwrap()
    }

    #[test]
    fn test_clip_rectangle_copies_region() {
        let raster = ramp(4, 4);
        let clipped = raster.clip_rectangle(1, 2, 2, 2).unwrap();
        assert_eq!(clipped.dimensions(), (2, 2));
        assert_eq!(clipped.data(), &[9, 10, 13, 14]);
    }

    #[test]
    fn test_clip_rectangle_rgb() {
        let data = (0..12).collect();
        let raster = Raster::from_samples(2, 2, PixelFormat::Rgb24, data).unwrap();
        let clipped = raster.clip_rectangle(1, 1, 1, 1).unwrap();
        assert_eq!(clipped.data(), &[9, 10, 11]);
    }

    #[test]
    fn test_clip_rectangle_errors() {
        let raster = ramp(4, 4);
        assert!(raster.clip_rectangle(0, 0, 0, 2).is_err());
        assert!(raster.clip_rectangle(4, 0, 1, 1).is_err());
    }

    #[test]
    fn test_clip_intervals() {
        let raster = ramp(4, 4);
        let rows = Interval::new(1, 2).unwrap();
        let cols = Interval::new(0, 1).unwrap();
        let clipped = raster.clip_intervals(rows, cols).unwrap();
        assert_eq!(clipped.data(), &[4, 5, 8, 9]);
    }

    #[test]
    fn test_clip_intervals_out_of_range() {
        let raster = ramp(4, 4);
        let rows = Interval::new(0, 4).unwrap();
        let cols = Interval::new(0, 1).unwrap();
        assert!(matches!(
            raster.clip_intervals(rows, cols),
            Err(Error::InvalidInterval { dimension: 4, .. })
        ));
    }
}
