//! Per-row and per-column channel sums
//!
//! Each sum treats the raster as 3-channel: a gray sample `g`
//! contributes `g` to every channel. Sums are exact integers, so a line
//! of pure background compares equal to `len * background[channel]`.

use super::{PixelFormat, Raster};
use crate::color::CHANNELS;

/// Sum of each of the R, G, B channels over a line of pixels
pub type ChannelSums = [u64; CHANNELS];

impl Raster {
    /// Sum each channel over all pixels of row `y`.
    ///
    /// Returns `None` if `y >= height`.
    pub fn row_channel_sums(&self, y: u32) -> Option<ChannelSums> {
        if y >= self.height() {
            return None;
        }
        let row = self.row_data(y);
        let mut sums = [0u64; CHANNELS];
        match self.format() {
            PixelFormat::Gray8 => {
                let total: u64 = row.iter().map(|&g| g as u64).sum();
                sums = [total; CHANNELS];
            }
            PixelFormat::Rgb24 => {
                for px in row.chunks_exact(CHANNELS) {
                    for (sum, &s) in sums.iter_mut().zip(px) {
                        *sum += s as u64;
                    }
                }
            }
        }
        Some(sums)
    }

    /// Sum each channel over all pixels of column `x`.
    ///
    /// Returns `None` if `x >= width`.
    pub fn column_channel_sums(&self, x: u32) -> Option<ChannelSums> {
        if x >= self.width() {
            return None;
        }
        let mut sums = [0u64; CHANNELS];
        for y in 0..self.height() {
            for (sum, s) in sums.iter_mut().zip(self.get_rgb_unchecked(x, y).channels()) {
                *sum += s as u64;
            }
        }
        Some(sums)
    }
}
