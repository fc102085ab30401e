//! glyphnorm Core - Basic data structures for glyph normalization
//!
//! This crate provides the fundamental data structures used throughout
//! the glyphnorm pipeline:
//!
//! - [`Raster`] / [`RasterMut`] - The image container (immutable / mutable)
//! - [`PixelFormat`] - Single-channel grayscale or 3-channel RGB samples
//! - [`Color`] - An RGB triple, used as the background reference
//! - [`Interval`] - An inclusive row or column range
//!
//! Rasters are cheap to clone (shared ownership) and are never mutated in
//! place once published; every pipeline stage takes a `&Raster` and
//! returns a new owned `Raster`.

pub mod color;
pub mod error;
pub mod interval;
pub mod raster;

pub use color::Color;
pub use error::{Error, Result};
pub use interval::Interval;
pub use raster::statistics::ChannelSums;
pub use raster::{PixelFormat, Raster, RasterMut};
