//! Reducing a song's label sequence to one overall emotion.
//!
//! A label that covers more than half of the song wins outright. Otherwise the
//! ending decides: the most frequent label in the trailing third.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::emotion::{AsEmotion, Emotion};

/// Overall emotion of a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overall {
    Label(Emotion),
    Unknown,
}

impl Overall {
    pub fn label(self) -> Option<Emotion> {
        match self {
            Overall::Label(emotion) => Some(emotion),
            Overall::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Overall::Label(emotion) => emotion.as_str(),
            Overall::Unknown => "unknown",
        }
    }
}

impl From<Option<Emotion>> for Overall {
    fn from(label: Option<Emotion>) -> Self {
        label.map_or(Overall::Unknown, Overall::Label)
    }
}

impl fmt::Display for Overall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Overall {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How the overall emotion was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallReason {
    Empty,
    Majority,
    Ending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: Overall,
    pub count: usize,
}

/// Overall emotion with the figures behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySummary {
    pub overall: Overall,
    pub reason: OverallReason,
    pub segment_count: usize,
    /// Share of segments carrying the overall label, in percent
    pub share: f32,
    /// Up to two other known labels, most frequent first
    pub secondary: Vec<Emotion>,
    /// Every bucket, most frequent first, ties in first-seen order
    pub distribution: Vec<LabelCount>,
}

impl TrajectorySummary {
    /// One-sentence English rationale
    pub fn explanation(&self) -> String {
        let mut text = match self.reason {
            OverallReason::Empty => return "No segments to judge.".to_string(),
            OverallReason::Majority => {
                let count = self
                    .distribution
                    .iter()
                    .find(|c| c.label == self.overall)
                    .map_or(0, |c| c.count);
                format!(
                    "{} covers {:.0}% of the song ({} of {} segments).",
                    self.overall, self.share, count, self.segment_count
                )
            }
            OverallReason::Ending => format!(
                "No label covers more than half of the song; {} dominates the ending.",
                self.overall
            ),
        };

        if !self.secondary.is_empty() {
            let others: Vec<&str> = self.secondary.iter().map(|e| e.as_str()).collect();
            text.push_str(&format!(" Also present: {}.", others.join(", ")));
        }
        text
    }
}

/// Frequencies per bucket in first-seen order
pub(crate) fn count_buckets<T: AsEmotion>(labels: &[T]) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = Vec::new();
    for label in labels {
        let bucket = Overall::from(label.as_emotion());
        match counts.iter_mut().find(|c| c.label == bucket) {
            Some(entry) => entry.count += 1,
            None => counts.push(LabelCount {
                label: bucket,
                count: 1,
            }),
        }
    }
    counts
}

/// Most frequent bucket; the first one seen wins ties.
fn most_frequent(counts: &[LabelCount]) -> Option<&LabelCount> {
    counts.iter().fold(None, |best: Option<&LabelCount>, c| match best {
        Some(b) if b.count >= c.count => Some(b),
        _ => Some(c),
    })
}

fn decide<T: AsEmotion>(labels: &[T], counts: &[LabelCount]) -> (Overall, OverallReason) {
    let Some(top) = most_frequent(counts) else {
        return (Overall::Unknown, OverallReason::Empty);
    };

    if top.count * 2 > labels.len() {
        return (top.label, OverallReason::Majority);
    }

    let window = (labels.len() / 3).max(1);
    let tail = count_buckets(&labels[labels.len() - window..]);
    let ending = most_frequent(&tail).map_or(Overall::Unknown, |c| c.label);
    (ending, OverallReason::Ending)
}

/// Overall emotion of a label sequence.
///
/// Missing or unrecognised labels form their own `unknown` bucket, which can
/// win like any other.
pub fn overall_emotion<T: AsEmotion>(labels: &[T]) -> Overall {
    decide(labels, &count_buckets(labels)).0
}

/// Overall emotion plus the rationale behind it.
pub fn summarize<T: AsEmotion>(labels: &[T]) -> TrajectorySummary {
    let counts = count_buckets(labels);
    let (overall, reason) = decide(labels, &counts);

    let overall_count = counts
        .iter()
        .find(|c| c.label == overall)
        .map_or(0, |c| c.count);
    let share = if labels.is_empty() {
        0.0
    } else {
        overall_count as f32 * 100.0 / labels.len() as f32
    };

    let mut distribution = counts;
    // stable sort keeps first-seen order among equal counts
    distribution.sort_by(|a, b| b.count.cmp(&a.count));

    let secondary = distribution
        .iter()
        .filter(|c| c.label != overall)
        .filter_map(|c| c.label.label())
        .take(2)
        .collect();

    TrajectorySummary {
        overall,
        reason,
        segment_count: labels.len(),
        share,
        secondary,
        distribution,
    }
}

/// The trajectory with consecutive repeats merged.
pub fn collapse_runs<T: AsEmotion>(labels: &[T]) -> Vec<Overall> {
    let mut path: Vec<Overall> = Vec::new();
    for label in labels {
        let bucket = Overall::from(label.as_emotion());
        if path.last() != Some(&bucket) {
            path.push(bucket);
        }
    }
    path
}

/// Number of label changes along the song
pub fn transition_count<T: AsEmotion>(labels: &[T]) -> usize {
    collapse_runs(labels).len().saturating_sub(1)
}

/// True when every segment carries the same known label
pub fn is_stable<T: AsEmotion>(labels: &[T]) -> bool {
    matches!(collapse_runs(labels).as_slice(), [Overall::Label(_)])
}

/// Render the collapsed path as `sad → hope`
pub fn format_path<T: AsEmotion>(labels: &[T]) -> String {
    collapse_runs(labels)
        .iter()
        .map(|bucket| bucket.as_str())
        .collect::<Vec<_>>()
        .join(" → ")
}
