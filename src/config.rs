use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the
/// `LYRIC_MOOD` prefix. For example: `LYRIC_MOOD_CLASSIFIER__HARD_FLOOR=0.4`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Emotion classifier configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Segment pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Zero-shot model identifier handed to backends
    #[serde(default = "default_model")]
    pub model: String,

    /// Minimum top score to accept the backend's label outright
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Minimum top score to accept the backend's label after lexicon and
    /// polarity fallbacks found nothing
    #[serde(default = "default_hard_floor")]
    pub hard_floor: f32,

    /// Ask the backend for independent per-label scores
    #[serde(default)]
    pub multi_label: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            confidence_threshold: default_confidence_threshold(),
            hard_floor: default_hard_floor(),
            multi_label: false,
        }
    }
}

fn default_model() -> String {
    "facebook/bart-large-mnli".to_string()
}

fn default_confidence_threshold() -> f32 {
    0.55
}

fn default_hard_floor() -> f32 {
    0.35
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Minimum similarity for ranked retrieval
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Rank by similarity instead of boolean matching
    #[serde(default)]
    pub ranked: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            ranked: false,
        }
    }
}

fn default_similarity_threshold() -> f32 {
    0.6
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Classify segments of a song concurrently
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Segments beyond this count are left out of analysis
    #[serde(default = "default_max_segments")]
    pub max_segments: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            max_segments: default_max_segments(),
        }
    }
}

fn default_parallel() -> bool {
    true
}

fn default_max_segments() -> usize {
    20
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `LYRIC_MOOD_` and use
    /// double underscores for nested values:
    /// - `LYRIC_MOOD_CLASSIFIER__CONFIDENCE_THRESHOLD` -> classifier.confidence_threshold
    /// - `LYRIC_MOOD_SEARCH__RANKED` -> search.ranked
    /// - `LYRIC_MOOD_PIPELINE__MAX_SEGMENTS` -> pipeline.max_segments
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("LYRIC_MOOD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
