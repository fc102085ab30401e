//! RGB colors and channel indices
//!
//! A [`Color`] is the reference value for "empty" pixels during ink
//! detection, and the fill value for padding. Grayscale rasters are
//! treated as the equivalent 3-channel color `(g, g, g)`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Red channel index
pub const RED: usize = 0;
/// Green channel index
pub const GREEN: usize = 1;
/// Blue channel index
pub const BLUE: usize = 2;

/// Number of color channels considered by the pipeline
pub const CHANNELS: usize = 3;

/// RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray color with all channels equal to `v`
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// True if all three channels are equal
    #[inline]
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Convert to grayscale value (0-255)
    pub fn to_gray(&self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }

    /// Channel values in `[RED, GREEN, BLUE]` order
    #[inline]
    pub fn channels(&self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse `R,G,B` (decimal) or `#RRGGBB` (hex).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Color::new(byte(0)?, byte(2)?, byte(4)?));
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != CHANNELS {
            return Err(invalid());
        }
        let mut vals = [0u8; CHANNELS];
        for (val, part) in vals.iter_mut().zip(&parts) {
            *val = part.parse().map_err(|_| invalid())?;
        }
        Ok(Color::new(vals[RED], vals[GREEN], vals[BLUE]))
    }
}
