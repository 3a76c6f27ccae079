//! Lyric Mood
//!
//! Emotion tagging for Thai and English song lyrics. Each lyric segment gets
//! one of eight labels, free-text queries describing an emotional arc are
//! parsed into label sequences, and songs are matched or ranked by how well
//! their per-segment trajectory follows that arc.
//!
//! ```
//! use lyric_mood::{query, search, Emotion};
//!
//! let arc = query::parse("sad → hope");
//! assert_eq!(arc, vec![Emotion::Sad, Emotion::Hope]);
//! assert!(search::soft_subsequence_match(&arc, &[Emotion::Sad, Emotion::Calm, Emotion::Hope]));
//! ```

pub mod classifier;
pub mod config;
pub mod emotion;
pub mod error;
pub mod evaluation;
pub mod library;
pub mod pipeline;
pub mod query;
pub mod search;
pub mod stats;
pub mod text;
pub mod trajectory;
pub mod types;

pub use classifier::{
    Classification, ClassifierError, DecisionSource, EmotionClassifier, LabelScore,
    ZeroShotClassifier,
};
pub use config::AppConfig;
pub use emotion::{canonicalize, AsEmotion, Canonical, Emotion};
pub use error::{AppError, Result};
pub use trajectory::{overall_emotion, Overall};
pub use types::{Segment, Song};
