//! Ink bounding box detection
//!
//! Finds the row and column extent of everything that is not background.
//!
//! # Algorithm
//!
//! 1. **Row scan**: each row's per-channel sum is compared with the sum a
//!    row of pure background would have, `width * background[channel]`.
//!    The first differing row from the top is the upper bound; an
//!    independent scan from the bottom gives the lower bound.
//! 2. **Column scan**: the same, summing over rows per column and
//!    comparing with `height * background[channel]`.
//!
//! A line counts as ink if *any* channel sum differs. Because the test is
//! on sums, a line whose deviations cancel out exactly reads as
//! background; this matches how the training drawings were cropped.

use crate::{RecogError, RecogResult};
use glyphnorm_core::{ChannelSums, Color, Interval, Raster};
use std::fmt;
use tracing::debug;

/// Row and column extent of the ink in a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBounds {
    /// Vertical extent (inclusive row indices)
    pub rows: Interval,
    /// Horizontal extent (inclusive column indices)
    pub cols: Interval,
}

impl GlyphBounds {
    /// Width of the bounded region in pixels
    pub fn width(&self) -> u32 {
        self.cols.len()
    }

    /// Height of the bounded region in pixels
    pub fn height(&self) -> u32 {
        self.rows.len()
    }

    /// Widen both intervals by `margin`, clamped to a `width x height`
    /// raster.
    pub fn expand(&self, margin: u32, width: u32, height: u32) -> Self {
        Self {
            rows: self.rows.expand(margin, height),
            cols: self.cols.expand(margin, width),
        }
    }
}

impl fmt::Display for GlyphBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rows {} cols {}", self.rows, self.cols)
    }
}

/// Expected channel sums for `count` background pixels
fn background_sums(background: Color, count: u32) -> ChannelSums {
    background.channels().map(|c| c as u64 * count as u64)
}

/// Find the first and last line whose sums differ from `expected`.
///
/// The two ends are found by independent scans.
fn scan<F>(lines: u32, expected: ChannelSums, sums: F) -> Option<Interval>
where
    F: Fn(u32) -> Option<ChannelSums>,
{
    let is_ink = |i: u32| sums(i).is_some_and(|s| s != expected);
    let first = (0..lines).find(|&i| is_ink(i))?;
    let last = (0..lines).rev().find(|&i| is_ink(i))?;
    Interval::new(first, last).ok()
}

/// Vertical extent of the ink, or `None` if every row is background
pub fn row_bounds(raster: &Raster, background: Color) -> Option<Interval> {
    let expected = background_sums(background, raster.width());
    scan(raster.height(), expected, |y| raster.row_channel_sums(y))
}

/// Horizontal extent of the ink, or `None` if every column is background
pub fn column_bounds(raster: &Raster, background: Color) -> Option<Interval> {
    let expected = background_sums(background, raster.height());
    scan(raster.width(), expected, |x| raster.column_channel_sums(x))
}

/// Detect the ink bounding box of a raster drawn on `background`.
///
/// # Errors
///
/// Returns [`RecogError::EmptyDrawing`] if either axis has no line that
/// differs from the background.
pub fn detect_bounds(raster: &Raster, background: Color) -> RecogResult<GlyphBounds> {
    let rows = row_bounds(raster, background).ok_or(RecogError::EmptyDrawing)?;
    let cols = column_bounds(raster, background).ok_or(RecogError::EmptyDrawing)?;
    let bounds = GlyphBounds { rows, cols };
    debug!(
        width = raster.width(),
        height = raster.height(),
        %background,
        %bounds,
        "detected ink bounds"
    );
    Ok(bounds)
}
