//! Recognizer configuration

use glyphnorm_recog::{NormalizeOptions, RecogResult};
use std::path::PathBuf;

/// Configuration of a [`Recognizer`](crate::Recognizer)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognizerConfig {
    /// Normalization parameters
    pub options: NormalizeOptions,

    /// Directory receiving `scaled.png` and `final.png` for every request
    /// (default: None)
    pub debug_dir: Option<PathBuf>,
}

impl RecognizerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normalization options
    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the debug artifact directory
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> RecogResult<()> {
        self.options.validate()
    }
}
