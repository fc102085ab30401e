//! glyphnorm - Freehand digit normalization for Rust
//!
//! Converts a hand-drawn character of any resolution and position into the
//! canonical layout digit classifiers are trained on: a 28x28 raster with
//! the ink scaled into a centered 20x20 square, flattened into 784
//! inverted intensities in `[0, 1]`.
//!
//! # Overview
//!
//! - Raster I/O (PNG, PNM)
//! - Ink bounding box detection against a configurable background
//! - Crop, uniform scale and symmetric padding
//! - A write-once classifier slot filled by a background loader
//! - [`Recognizer`], the request boundary that turns every failure into a
//!   displayable [`RecognitionOutcome`]
//!
//! # Example
//!
//! ```
//! use glyphnorm::{Color, PixelFormat, Raster, Recognizer, RecognizerConfig, RecognitionOutcome};
//!
//! let blank = Raster::new_filled(64, 64, PixelFormat::Rgb24, Color::WHITE).unwrap();
//! let recognizer = Recognizer::new(RecognizerConfig::default()).unwrap();
//! assert_eq!(recognizer.recognize(&blank), RecognitionOutcome::EmptyDrawing);
//! ```

pub mod config;
pub mod recognizer;

pub use config::RecognizerConfig;
pub use recognizer::{RecognitionOutcome, Recognizer};

// Re-export core types (primary data structures used everywhere)
pub use glyphnorm_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use glyphnorm_io as io;
pub use glyphnorm_recog as recog;
pub use glyphnorm_transform as transform;
