//! Classifier plumbing
//!
//! The inference engine itself is external. This module defines the seam
//! it plugs into ([`Classifier`]), an adapter for engines that return a
//! score per label ([`ScoreClassifier`]), label sets, and the
//! [`ClassifierSlot`] through which a background loader publishes the
//! classifiers once they are available.
//!
//! # Slot lifecycle
//!
//! A slot starts out loading. It is published exactly once, either as
//! ready with a list of classifiers or as unavailable with a reason, and
//! never changes afterwards. Readers never block: before publication they
//! get [`RecogError::NotReady`].

use crate::vector::InputVector;
use crate::{RecogError, RecogResult};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

/// Outcome of running one classifier
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Best label, or `None` if the classifier could not decide
    pub label: Option<String>,
    /// Confidence of the best label
    pub confidence: f32,
}

impl Classification {
    /// A decided classification
    pub fn labeled(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: Some(label.into()),
            confidence,
        }
    }

    /// An undecided classification
    pub fn unknown() -> Self {
        Self {
            label: None,
            confidence: 0.0,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}, {:.6}", label, self.confidence),
            None => f.write_str("?"),
        }
    }
}

/// A named digit classifier
pub trait Classifier: Send + Sync {
    /// Short name shown next to the result
    fn name(&self) -> &str;

    /// Classify one input vector
    fn classify(&self, input: &InputVector) -> RecogResult<Classification>;
}

/// Character set type for label lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharsetType {
    /// Arabic numerals: 0-9 (10 characters)
    #[default]
    ArabicNumerals,
}

impl CharsetType {
    /// Returns the characters as classifier labels
    pub fn labels(&self) -> Vec<String> {
        match self {
            CharsetType::ArabicNumerals => ('0'..='9').map(String::from).collect(),
        }
    }
}

/// Read labels, one per non-empty line.
///
/// Surrounding whitespace is trimmed from each label.
pub fn load_labels<P: AsRef<Path>>(path: P) -> RecogResult<Vec<String>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let labels = parse_labels(&text);
    if labels.is_empty() {
        return Err(RecogError::InvalidParameter(format!(
            "no labels in {}",
            path.as_ref().display()
        )));
    }
    Ok(labels)
}

fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Adapter for engines that return one score per label
///
/// The engine is any function from the flat input to a score vector. The
/// label with the highest score wins; with a minimum confidence set,
/// lower winning scores yield an undecided result.
pub struct ScoreClassifier<F> {
    name: String,
    labels: Vec<String>,
    infer: F,
    min_confidence: Option<f32>,
}

impl<F> ScoreClassifier<F>
where
    F: Fn(&[f32]) -> Result<Vec<f32>, String> + Send + Sync,
{
    /// Create a classifier from a name, its labels and an engine.
    pub fn new(name: impl Into<String>, labels: Vec<String>, infer: F) -> Self {
        Self {
            name: name.into(),
            labels,
            infer,
            min_confidence: None,
        }
    }

    /// Require the winning score to reach `threshold`.
    pub fn with_min_confidence(mut self, threshold: f32) -> Self {
        self.min_confidence = Some(threshold);
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl<F> Classifier for ScoreClassifier<F>
where
    F: Fn(&[f32]) -> Result<Vec<f32>, String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn classify(&self, input: &InputVector) -> RecogResult<Classification> {
        let scores = (self.infer)(input.as_slice()).map_err(RecogError::Inference)?;
        if scores.len() != self.labels.len() {
            return Err(RecogError::Inference(format!(
                "{} scores for {} labels",
                scores.len(),
                self.labels.len()
            )));
        }
        let best = scores
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_nan())
            .fold(None, |best: Option<(usize, f32)>, (i, &s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((i, s)),
            });
        Ok(match best {
            Some((_, score)) if self.min_confidence.is_some_and(|t| score < t) => Classification {
                label: None,
                confidence: score,
            },
            Some((i, score)) => Classification::labeled(self.labels[i].clone(), score),
            None => Classification::unknown(),
        })
    }
}

/// Classifier list held by a slot
pub type Classifiers = Vec<Box<dyn Classifier>>;

enum SlotState {
    Ready(Classifiers),
    Unavailable(String),
}

/// Observable state of a [`ClassifierSlot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    /// Nothing published yet
    Loading,
    /// Ready with this many classifiers
    Ready(usize),
    /// Loading failed for this reason
    Unavailable(String),
}

/// Write-once handle to the loaded classifiers
///
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct ClassifierSlot {
    state: Arc<OnceLock<SlotState>>,
}

impl fmt::Debug for ClassifierSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierSlot")
            .field("status", &self.status())
            .finish()
    }
}

impl ClassifierSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that is already ready.
    pub fn with_classifiers(classifiers: Classifiers) -> RecogResult<Self> {
        let slot = Self::new();
        slot.publish(classifiers)?;
        Ok(slot)
    }

    fn set(&self, state: SlotState) -> RecogResult<()> {
        self.state
            .set(state)
            .map_err(|_| RecogError::InvalidParameter("classifier slot already published".to_string()))
    }

    /// Publish the loaded classifiers.
    ///
    /// # Errors
    ///
    /// Fails if the list is empty or the slot was already published.
    pub fn publish(&self, classifiers: Classifiers) -> RecogResult<()> {
        if classifiers.is_empty() {
            return Err(RecogError::InvalidParameter(
                "no classifiers to publish".to_string(),
            ));
        }
        self.set(SlotState::Ready(classifiers))
    }

    /// Mark the slot permanently unavailable.
    pub fn fail(&self, reason: impl Into<String>) -> RecogResult<()> {
        self.set(SlotState::Unavailable(reason.into()))
    }

    pub fn status(&self) -> SlotStatus {
        match self.state.get() {
            None => SlotStatus::Loading,
            Some(SlotState::Ready(c)) => SlotStatus::Ready(c.len()),
            Some(SlotState::Unavailable(reason)) => SlotStatus::Unavailable(reason.clone()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state.get(), Some(SlotState::Ready(_)))
    }

    /// The published classifiers.
    ///
    /// # Errors
    ///
    /// - [`RecogError::NotReady`] before publication
    /// - [`RecogError::ClassifierUnavailable`] if loading failed
    pub fn classifiers(&self) -> RecogResult<&[Box<dyn Classifier>]> {
        match self.state.get() {
            None => Err(RecogError::NotReady),
            Some(SlotState::Ready(c)) => Ok(c),
            Some(SlotState::Unavailable(reason)) => {
                Err(RecogError::ClassifierUnavailable(reason.clone()))
            }
        }
    }

    /// Run every classifier on `input`, in publication order.
    ///
    /// A classifier that fails is logged and reported as undecided.
    pub fn classify(&self, input: &InputVector) -> RecogResult<Vec<(String, Classification)>> {
        let results = self
            .classifiers()?
            .iter()
            .map(|c| {
                let result = c.classify(input).unwrap_or_else(|e| {
                    warn!(classifier = c.name(), "classification failed: {}", e);
                    Classification::unknown()
                });
                (c.name().to_string(), result)
            })
            .collect();
        Ok(results)
    }

    /// Run `loader` on a background thread and publish its result.
    ///
    /// An `Err` or an empty list marks the slot unavailable.
    pub fn load_in_background<F>(&self, loader: F) -> RecogResult<JoinHandle<()>>
    where
        F: FnOnce() -> Result<Classifiers, String> + Send + 'static,
    {
        let slot = self.clone();
        let handle = thread::Builder::new()
            .name("classifier-loader".to_string())
            .spawn(move || {
                let published = match loader() {
                    Ok(classifiers) if classifiers.is_empty() => {
                        warn!("classifier loader returned no classifiers");
                        slot.fail("no classifiers loaded")
                    }
                    Ok(classifiers) => {
                        info!(count = classifiers.len(), "classifiers loaded");
                        slot.publish(classifiers)
                    }
                    Err(reason) => {
                        warn!(%reason, "classifier loading failed");
                        slot.fail(reason)
                    }
                };
                if let Err(e) = published {
                    warn!("classifier slot not updated: {}", e);
                }
            })?;
        Ok(handle)
    }
}
