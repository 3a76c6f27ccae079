//! Songs and their labelled lyric segments.
//!
//! These are the records the surrounding application persists. The core only
//! reads and replaces them; it never stores anything itself.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::emotion::{normalize_label, Emotion};
use crate::trajectory::{overall_emotion, Overall};

/// One contiguous chunk of lyrics and the label assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Zero-based position within the song
    pub position: usize,
    pub text: String,
    /// Assigned label; `None` when missing or not in the closed set
    #[serde(default, deserialize_with = "lenient_label")]
    pub label: Option<Emotion>,
}

impl Segment {
    pub fn new(position: usize, text: impl Into<String>, label: Option<Emotion>) -> Self {
        Self {
            position,
            text: text.into(),
            label,
        }
    }
}

/// Accept English or Thai display forms; anything else becomes `None`.
fn lenient_label<'de, D>(deserializer: D) -> Result<Option<Emotion>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let label = normalize_label(&value);
        if label.is_none() && !value.trim().is_empty() {
            debug!(label = %value, "Stored label outside the closed set");
        }
        label
    }))
}

/// A song with its ordered segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Song {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            segments: Vec::new(),
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_segments(mut self, segments: Vec<Segment>) -> Self {
        self.replace_segments(segments);
        self
    }

    /// Per-segment labels in segment order
    pub fn trajectory(&self) -> Vec<Option<Emotion>> {
        self.segments.iter().map(|s| s.label).collect()
    }

    /// Overall emotion derived from the trajectory
    pub fn overall(&self) -> Overall {
        overall_emotion(&self.trajectory())
    }

    /// Swap in a freshly analysed segment list.
    ///
    /// Positions are renumbered densely in the given order.
    pub fn replace_segments(&mut self, mut segments: Vec<Segment>) {
        for (position, segment) in segments.iter_mut().enumerate() {
            segment.position = position;
        }
        self.segments = segments;
    }
}
