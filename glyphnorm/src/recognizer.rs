//! Request boundary
//!
//! [`Recognizer`] runs one classification request end to end: it copies
//! the caller's drawing, normalizes it, converts it to an input vector
//! and hands that to every published classifier. All pipeline errors are
//! absorbed here and reported as a [`RecognitionOutcome`], so a bad
//! drawing never takes the host down.

use crate::config::RecognizerConfig;
use glyphnorm_core::Raster;
use glyphnorm_io::{ImageFormat, write_image};
use glyphnorm_recog::{
    Classification, ClassifierSlot, InputVector, NormalizedGlyph, RecogError, RecogResult,
    normalize,
};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Prefix of the user-facing result text
const RESULT_PREFIX: &str = "Result: ";

/// Outcome of one recognition request
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutcome {
    /// The drawing has no ink
    EmptyDrawing,
    /// The pipeline aborted; the message describes why
    Failed(String),
    /// No classifier has been published yet
    NotReady(InputVector),
    /// Classifier loading failed
    Unavailable { reason: String, input: InputVector },
    /// Every classifier ran, in publication order
    Classified {
        input: InputVector,
        results: Vec<(String, Classification)>,
    },
}

impl RecognitionOutcome {
    /// The input vector, if normalization succeeded
    pub fn input(&self) -> Option<&InputVector> {
        match self {
            RecognitionOutcome::EmptyDrawing | RecognitionOutcome::Failed(_) => None,
            RecognitionOutcome::NotReady(input)
            | RecognitionOutcome::Unavailable { input, .. }
            | RecognitionOutcome::Classified { input, .. } => Some(input),
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, RecognitionOutcome::Classified { .. })
    }

    /// Text shown to the user.
    ///
    /// One `name: label, confidence` line per classifier, `name: ?` for an
    /// undecided classifier, and a lone `?` when nothing was classified.
    pub fn display_text(&self) -> String {
        let mut text = String::from(RESULT_PREFIX);
        match self {
            RecognitionOutcome::Classified { results, .. } => {
                for (name, classification) in results {
                    text.push_str(&format!("{}: {}\n", name, classification));
                }
            }
            _ => text.push_str("?\n"),
        }
        text
    }
}

/// Runs the normalization pipeline and the classifiers for each request
#[derive(Debug, Clone)]
pub struct Recognizer {
    config: RecognizerConfig,
    classifiers: ClassifierSlot,
}

impl Recognizer {
    /// Create a recognizer with an empty classifier slot.
    pub fn new(config: RecognizerConfig) -> RecogResult<Self> {
        Self::with_slot(config, ClassifierSlot::new())
    }

    /// Create a recognizer reading classifiers from `slot`.
    pub fn with_slot(config: RecognizerConfig, slot: ClassifierSlot) -> RecogResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            classifiers: slot,
        })
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// The slot classifiers are published into
    pub fn classifiers(&self) -> &ClassifierSlot {
        &self.classifiers
    }

    /// Normalize a drawing without classifying it.
    ///
    /// The drawing is copied first; the caller's raster is never shared
    /// with the pipeline. Debug artifacts are written when configured.
    pub fn normalize(&self, drawing: &Raster) -> RecogResult<NormalizedGlyph> {
        let snapshot = drawing.deep_clone();
        let glyph = normalize(&snapshot, &self.config.options)?;
        if let Some(dir) = &self.config.debug_dir {
            write_debug_artifacts(dir, &glyph);
        }
        Ok(glyph)
    }

    /// Normalize a drawing and run every classifier on it.
    pub fn recognize(&self, drawing: &Raster) -> RecognitionOutcome {
        let glyph = match self.normalize(drawing) {
            Ok(glyph) => glyph,
            Err(e) => return outcome_for_error(e),
        };
        let input = InputVector::from_glyph(&glyph);

        match self.classifiers.classify(&input) {
            Ok(results) => {
                debug!(count = results.len(), "classified");
                RecognitionOutcome::Classified { input, results }
            }
            Err(RecogError::NotReady) => {
                info!("classifier not ready");
                RecognitionOutcome::NotReady(input)
            }
            Err(RecogError::ClassifierUnavailable(reason)) => {
                RecognitionOutcome::Unavailable { reason, input }
            }
            Err(e) => {
                warn!("classification failed: {}", e);
                RecognitionOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Map a pipeline error to the outcome reported to the user.
fn outcome_for_error(err: RecogError) -> RecognitionOutcome {
    match err {
        e if e.is_empty_drawing() => {
            info!("no ink detected: {}", e);
            RecognitionOutcome::EmptyDrawing
        }
        RecogError::InvariantViolation { context } => {
            error!(%context, "normalized glyph is malformed");
            RecognitionOutcome::Failed(format!("invariant violation: {}", context))
        }
        e => {
            warn!("recognition request failed: {}", e);
            RecognitionOutcome::Failed(e.to_string())
        }
    }
}

/// Write `scaled.png` and `final.png`, replacing earlier ones.
///
/// Failures are logged only.
fn write_debug_artifacts(dir: &Path, glyph: &NormalizedGlyph) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!(dir = %dir.display(), "cannot create debug directory: {}", e);
        return;
    }
    for (name, raster) in [("scaled", &glyph.scaled), ("final", &glyph.glyph)] {
        let path = dir.join(format!("{}.{}", name, ImageFormat::Png.extension()));
        match write_image(raster, &path, ImageFormat::Png) {
            Ok(()) => debug!(path = %path.display(), "wrote debug artifact"),
            Err(e) => warn!(path = %path.display(), "cannot write debug artifact: {}", e),
        }
    }
}
