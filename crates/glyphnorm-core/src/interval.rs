//! Inclusive index ranges along one image axis
//!
//! An [`Interval`] is a pair `(start, end)` of inclusive row or column
//! indices with `start <= end`. Intervals returned by detection also
//! satisfy `end < dimension` for the axis they were measured on.

use crate::error::{Error, Result};
use std::fmt;

/// Inclusive `[start, end]` range of rows or columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: u32,
    end: u32,
}

impl Interval {
    /// Create an interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `start > end`.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidInterval {
                start,
                end,
                dimension: end.saturating_add(1),
            });
        }
        Ok(Self { start, end })
    }

    /// Create an interval that must fit inside an axis of `dimension` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if `start > end` or `end >= dimension`.
    pub fn within(start: u32, end: u32, dimension: u32) -> Result<Self> {
        if start > end || end >= dimension {
            return Err(Error::InvalidInterval {
                start,
                end,
                dimension,
            });
        }
        Ok(Self { start, end })
    }

    /// First index (inclusive)
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last index (inclusive)
    #[inline]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of indices covered (always >= 1).
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Always false: an interval covers at least one index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Widen by `margin` on both sides, clamped to `[0, dimension - 1]`.
    ///
    /// A side that already sits on the axis boundary is left unchanged.
    /// `dimension` must be greater than `self.end()`.
    pub fn expand(&self, margin: u32, dimension: u32) -> Self {
        let last = dimension.saturating_sub(1).max(self.end);
        Self {
            start: self.start.saturating_sub(margin),
            end: self.end.saturating_add(margin).min(last),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_len() {
        let iv = Interval::new(3, 7).unwrap();
        assert_eq!(iv.start(), 3);
        assert_eq!(iv.end(), 7);
        assert_eq!(iv.len(), 5);
    }

    #[test]
    fn test_reversed_is_rejected() {
        assert!(Interval::new(5, 4).is_err());
    }

    #[test]
    fn test_within_checks_dimension() {
        assert!(Interval::within(0, 9, 10).is_ok());
        assert!(Interval::within(0, 10, 10).is_err());
    }

    #[test]
    fn test_expand_interior() {
        let iv = Interval::new(10, 20).unwrap().expand(1, 100);
        assert_eq!((iv.start(), iv.end()), (9, 21));
    }

    #[test]
    fn test_expand_clamps_at_edges() {
        let iv = Interval::new(0, 99).unwrap().expand(1, 100);
        assert_eq!((iv.start(), iv.end()), (0, 99));

        let iv = Interval::new(0, 0).unwrap().expand(1, 1);
        assert_eq!((iv.start(), iv.end()), (0, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(1, 2).unwrap().to_string(), "[1, 2]");
    }
}
