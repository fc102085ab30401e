//! glyphnorm-recog - Handwritten glyph normalization and recognition support
//!
//! This crate turns a freehand drawing into classifier input:
//!
//! - **Bounds detection**: find the row and column extent of the ink
//! - **Normalization**: crop, scale to a 20 pixel inner square and center
//!   on a 28x28 canvas
//! - **Input vectors**: flatten and invert the glyph to floats in `[0, 1]`
//! - **Classifier plumbing**: the [`Classifier`] seam and a write-once
//!   [`ClassifierSlot`] filled by a background loader
//!
//! # Quick Start
//!
//! ```no_run
//! use glyphnorm_recog::{InputVector, NormalizeOptions, normalize};
//! use glyphnorm_core::{Color, PixelFormat, Raster};
//!
//! let drawing = Raster::new_filled(280, 280, PixelFormat::Rgb24, Color::WHITE).unwrap();
//! let glyph = normalize(&drawing, &NormalizeOptions::default()).unwrap();
//! let input = InputVector::from_glyph(&glyph);
//! assert_eq!(input.len(), 784);
//! ```
//!
//! # Modules
//!
//! - [`bounds`]: Ink bounding box detection
//! - [`normalize`]: Crop, scale and pad stages
//! - [`vector`]: Classifier input vectors
//! - [`classify`]: Classifier seam and slot

pub mod bounds;
pub mod classify;
mod error;
pub mod normalize;
pub mod vector;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use bounds::{GlyphBounds, detect_bounds};
pub use classify::{
    CharsetType, Classification, Classifier, ClassifierSlot, Classifiers, ScoreClassifier,
    SlotStatus, load_labels,
};
pub use normalize::{
    NormalizeOptions, NormalizedGlyph, Padding, normalize, normalize_with_bounds, split_padding,
};
pub use vector::InputVector;

// Re-export core for convenience
pub use glyphnorm_core;
