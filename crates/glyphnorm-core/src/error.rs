//! Error types for glyphnorm-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// glyphnorm-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Sample buffer does not match the declared geometry
    #[error("sample buffer length mismatch: expected {expected}, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Interval bounds are reversed or exceed the axis
    #[error("invalid interval [{start}, {end}] for dimension {dimension}")]
    InvalidInterval { start: u32, end: u32, dimension: u32 },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Color string could not be parsed
    #[error("invalid color '{0}': expected R,G,B or #RRGGBB")]
    InvalidColor(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
