//! Interface to an external zero-shot text classifier.
//!
//! Real backends (a local NLI model, a hosted inference endpoint) live in the
//! surrounding application. The crate only needs ranked scores back, or an
//! error it can fall back from.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A candidate label with the backend's score for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Errors a backend may report. None of these reach callers of the
/// emotion classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Classifier timed out after {0:?}")]
    Timeout(Duration),

    #[error("Classifier backend error: {0}")]
    Backend(String),
}

/// Zero-shot text classification over caller-supplied candidate labels.
pub trait ZeroShotClassifier: Send + Sync {
    /// Score `text` against `candidate_labels`.
    ///
    /// Results may come back in any order; with `multi_label` the scores are
    /// independent instead of summing to one.
    fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
        multi_label: bool,
    ) -> Result<Vec<LabelScore>, ClassifierError>;
}

impl<F> ZeroShotClassifier for F
where
    F: Fn(&str, &[&str], bool) -> Result<Vec<LabelScore>, ClassifierError> + Send + Sync,
{
    fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
        multi_label: bool,
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        self(text, candidate_labels, multi_label)
    }
}

/// Highest finite score in a backend response.
pub(crate) fn top_score(scores: &[LabelScore]) -> Option<&LabelScore> {
    scores
        .iter()
        .filter(|s| s.score.is_finite())
        .max_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
