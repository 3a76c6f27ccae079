//! Library-wide label statistics.

use serde::Serialize;

use crate::emotion::Emotion;
use crate::trajectory::{count_buckets, Overall};
use crate::types::Song;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShare {
    pub label: Overall,
    pub count: usize,
    /// Percent of all segments
    pub percent: f32,
}

/// Aggregate figures over a set of songs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total_songs: usize,
    pub total_segments: usize,
    pub avg_segments: f32,
    pub min_segments: usize,
    pub max_segments: usize,
    /// Segment counts per bucket, most frequent first
    pub distribution: Vec<LabelShare>,
    /// Most frequent known label
    pub most_popular: Option<Emotion>,
    /// Segments without a recognised label
    pub unknown_segments: usize,
}

impl LibraryStats {
    pub fn from_songs(songs: &[Song]) -> Self {
        let labels: Vec<Option<Emotion>> = songs.iter().flat_map(Song::trajectory).collect();
        let total_segments = labels.len();

        let mut counts = count_buckets(&labels);
        counts.sort_by(|a, b| b.count.cmp(&a.count));

        let distribution: Vec<LabelShare> = counts
            .iter()
            .map(|c| LabelShare {
                label: c.label,
                count: c.count,
                percent: c.count as f32 * 100.0 / total_segments as f32,
            })
            .collect();

        let most_popular = counts.iter().find_map(|c| c.label.label());
        let unknown_segments = counts
            .iter()
            .find(|c| c.label == Overall::Unknown)
            .map_or(0, |c| c.count);

        let lengths = songs.iter().map(|song| song.segments.len());
        let avg_segments = if songs.is_empty() {
            0.0
        } else {
            total_segments as f32 / songs.len() as f32
        };

        Self {
            total_songs: songs.len(),
            total_segments,
            avg_segments,
            min_segments: lengths.clone().min().unwrap_or(0),
            max_segments: lengths.max().unwrap_or(0),
            distribution,
            most_popular,
            unknown_segments,
        }
    }

    /// Percent of segments carrying `label`, 0.0 when absent
    pub fn percent_of(&self, label: Overall) -> f32 {
        self.distribution
            .iter()
            .find(|share| share.label == label)
            .map_or(0.0, |share| share.percent)
    }
}
