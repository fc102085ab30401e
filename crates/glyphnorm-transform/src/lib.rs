//! glyphnorm-transform - Geometric transformations for glyphnorm
//!
//! This crate provides the resampling used to bring a cropped glyph to
//! its target size:
//!
//! - Sampling (nearest neighbor)
//! - Linear interpolation (for upscaling)
//! - Area mapping (for downscaling with anti-aliasing)

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{ScaleMethod, scale, scale_by_sampling, scale_to_size};
