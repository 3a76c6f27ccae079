//! Per-segment emotion classification.
//!
//! The external zero-shot classifier is consulted first. When it is missing,
//! fails, or is not confident, an ordered chain of deterministic fallbacks
//! decides instead, so every call yields one of the eight labels:
//!
//! 1. blank text is `neutral`
//! 2. backend top score at or above the confidence threshold
//! 3. first lexicon hit among the text's tokens
//! 4. positive/negative marker balance
//! 5. backend top label at or above the hard floor
//! 6. `neutral`

pub mod backend;
pub mod fallback;

pub use backend::{ClassifierError, LabelScore, ZeroShotClassifier};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ClassifierConfig;
use crate::emotion::Emotion;
use crate::text::{is_blank, tokenize};

/// Which step of the chain produced a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    BlankText,
    Backend,
    Lexicon,
    Polarity,
    BackendBestEffort,
    Default,
}

impl fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionSource::BlankText => write!(f, "blank_text"),
            DecisionSource::Backend => write!(f, "backend"),
            DecisionSource::Lexicon => write!(f, "lexicon"),
            DecisionSource::Polarity => write!(f, "polarity"),
            DecisionSource::BackendBestEffort => write!(f, "backend_best_effort"),
            DecisionSource::Default => write!(f, "default"),
        }
    }
}

/// A label together with how it was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: Emotion,
    pub source: DecisionSource,
    /// Backend's top score, when the backend produced a usable one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_score: Option<f32>,
}

/// Emotion classifier with lexicon and context fallbacks.
#[derive(Clone)]
pub struct EmotionClassifier {
    backend: Option<Arc<dyn ZeroShotClassifier>>,
    config: ClassifierConfig,
}

impl fmt::Debug for EmotionClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmotionClassifier")
            .field("backend", &self.backend.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for EmotionClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl EmotionClassifier {
    /// Create a classifier without a backend; only the fallbacks run
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            backend: None,
            config,
        }
    }

    /// Create a classifier that consults `backend` first
    pub fn with_backend(backend: Arc<dyn ZeroShotClassifier>, config: ClassifierConfig) -> Self {
        Self {
            backend: Some(backend),
            config,
        }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a text segment. Always returns a label.
    pub fn classify(&self, text: &str) -> Emotion {
        self.classify_detailed(text).label
    }

    /// Classify a text segment and report which step decided.
    pub fn classify_detailed(&self, text: &str) -> Classification {
        if is_blank(text) {
            return Classification {
                label: Emotion::Neutral,
                source: DecisionSource::BlankText,
                backend_score: None,
            };
        }

        let prediction = self.backend_prediction(text);
        let backend_score = prediction.map(|(_, score)| score);
        let decided = |label, source| Classification {
            label,
            source,
            backend_score,
        };

        if let Some((label, score)) = prediction {
            if score >= self.config.confidence_threshold {
                return decided(label, DecisionSource::Backend);
            }
        }

        let tokens = tokenize(text);

        if let Some(label) = fallback::lexicon_match(&tokens) {
            debug!(%label, "Lexicon fallback matched");
            return decided(label, DecisionSource::Lexicon);
        }

        if let Some(label) = fallback::polarity(&tokens) {
            debug!(%label, "Polarity fallback decided");
            return decided(label, DecisionSource::Polarity);
        }

        if let Some((label, score)) = prediction {
            if score >= self.config.hard_floor {
                debug!(%label, score, "Accepting weak backend label");
                return decided(label, DecisionSource::BackendBestEffort);
            }
        }

        decided(Emotion::Neutral, DecisionSource::Default)
    }

    /// Top backend label and score, or `None` if there is no usable answer.
    fn backend_prediction(&self, text: &str) -> Option<(Emotion, f32)> {
        let backend = self.backend.as_ref()?;
        let labels = Emotion::candidate_labels();

        let scores = match backend.classify(text, &labels, self.config.multi_label) {
            Ok(scores) => scores,
            Err(e) => {
                warn!(
                    error = %e,
                    model = %self.config.model,
                    "Zero-shot classifier failed, using fallbacks"
                );
                return None;
            }
        };

        let top = backend::top_score(&scores)?;
        match Emotion::from_english(&top.label) {
            Some(label) => Some((label, top.score)),
            None => {
                debug!(label = %top.label, "Backend ranked a label outside the closed set");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend returning a fixed response
    struct Fixed(Vec<LabelScore>);

    impl ZeroShotClassifier for Fixed {
        fn classify(
            &self,
            _text: &str,
            _candidate_labels: &[&str],
            _multi_label: bool,
        ) -> Result<Vec<LabelScore>, ClassifierError> {
            Ok(self.0.clone())
        }
    }

    /// Backend that always fails
    struct Failing;

    impl ZeroShotClassifier for Failing {
        fn classify(
            &self,
            _text: &str,
            _candidate_labels: &[&str],
            _multi_label: bool,
        ) -> Result<Vec<LabelScore>, ClassifierError> {
            Err(ClassifierError::Unavailable("model not loaded".to_string()))
        }
    }

    fn with_top(label: &str, score: f32) -> EmotionClassifier {
        let scores = vec![
            LabelScore::new("neutral", (1.0 - score) / 2.0),
            LabelScore::new(label, score),
        ];
        EmotionClassifier::with_backend(Arc::new(Fixed(scores)), ClassifierConfig::default())
    }

    #[test]
    fn test_blank_text_is_neutral() {
        let classifier = with_top("angry", 0.99);
        let result = classifier.classify_detailed("   ");
        assert_eq!(result.label, Emotion::Neutral);
        assert_eq!(result.source, DecisionSource::BlankText);
    }

    #[test]
    fn test_confident_backend_wins() {
        let classifier = with_top("angry", 0.8);
        let result = classifier.classify_detailed("ฉันเสียใจ");
        assert_eq!(result.label, Emotion::Angry);
        assert_eq!(result.source, DecisionSource::Backend);
        assert_eq!(result.backend_score, Some(0.8));
    }

    #[test]
    fn test_unconfident_backend_defers_to_lexicon() {
        let classifier = with_top("neutral", 0.5);
        let result = classifier.classify_detailed("ฉันเสียใจที่เธอจากไป");
        assert_eq!(result.label, Emotion::Sad);
        assert_eq!(result.source, DecisionSource::Lexicon);
    }

    #[test]
    fn test_polarity_after_lexicon() {
        let classifier = with_top("neutral", 0.3);
        let result = classifier.classify_detailed("love and a good smile");
        assert_eq!(result.label, Emotion::Happy);
        assert_eq!(result.source, DecisionSource::Polarity);
    }

    #[test]
    fn test_weak_backend_label_above_floor() {
        let classifier = with_top("hope", 0.4);
        let result = classifier.classify_detailed("the road goes on");
        assert_eq!(result.label, Emotion::Hope);
        assert_eq!(result.source, DecisionSource::BackendBestEffort);
    }

    #[test]
    fn test_below_floor_is_neutral() {
        let classifier = with_top("hope", 0.3);
        let result = classifier.classify_detailed("the road goes on");
        assert_eq!(result.label, Emotion::Neutral);
        assert_eq!(result.source, DecisionSource::Default);
    }

    #[test]
    fn test_failure_uses_fallbacks() {
        let classifier =
            EmotionClassifier::with_backend(Arc::new(Failing), ClassifierConfig::default());
        assert_eq!(classifier.classify("โกรธมาก"), Emotion::Angry);

        let result = classifier.classify_detailed("plain words");
        assert_eq!(result.label, Emotion::Neutral);
        assert_eq!(result.backend_score, None);
    }

    #[test]
    fn test_without_backend() {
        let classifier = EmotionClassifier::default();
        assert!(!classifier.has_backend());
        assert_eq!(classifier.classify("ตื่นเต้นจัง"), Emotion::Excited);
        assert_eq!(classifier.classify("tears and pain"), Emotion::Sad);
    }

    #[test]
    fn test_out_of_set_backend_label_is_ignored() {
        let classifier = with_top("anxious", 0.95);
        let result = classifier.classify_detailed("nothing to see");
        assert_eq!(result.label, Emotion::Neutral);
        assert_eq!(result.source, DecisionSource::Default);
    }

    #[test]
    fn test_always_in_closed_set() {
        let long_text = "ฝนตก ".repeat(5_000);
        let backends: Vec<EmotionClassifier> = vec![
            EmotionClassifier::default(),
            with_top("calm", 0.2),
            EmotionClassifier::with_backend(Arc::new(Failing), ClassifierConfig::default()),
        ];
        for classifier in &backends {
            for text in ["", long_text.as_str(), "???", "สุข"] {
                let label = classifier.classify(text);
                assert!(Emotion::ALL.contains(&label));
            }
        }
    }

    #[test]
    fn test_deterministic_with_fixed_backend() {
        let classifier = with_top("calm", 0.45);
        let text = "เพลงนี้ฟังสบาย";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }
}
