//! Scoring the classifier against labelled samples.
//!
//! Ground truth can come straight from annotators or be derived from several
//! crowd votes per text with [`majority_vote`].

use serde::Serialize;
use tracing::info;

use crate::classifier::EmotionClassifier;
use crate::emotion::{AsEmotion, Emotion};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelMetrics {
    pub label: Emotion,
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    /// Samples whose expected label is this one
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub total: usize,
    pub correct: usize,
    pub accuracy: f32,
    /// One entry per label, in canonical order
    pub per_label: Vec<LabelMetrics>,
    /// F1 averaged with each label weighted by its support
    pub weighted_f1: f32,
    /// Share of predictions that were `neutral`
    pub neutral_ratio: f32,
    /// Counts with expected labels as rows and predicted labels as columns,
    /// both in canonical order
    pub confusion: Vec<Vec<usize>>,
}

fn label_index(label: Emotion) -> usize {
    Emotion::ALL
        .iter()
        .position(|l| *l == label)
        .unwrap_or_default()
}

fn ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

/// Classify every sample and compare with its expected label.
pub fn evaluate<S: AsRef<str>>(
    classifier: &EmotionClassifier,
    samples: &[(S, Emotion)],
) -> EvaluationReport {
    let predictions: Vec<(Emotion, Emotion)> = samples
        .iter()
        .map(|(text, expected)| (*expected, classifier.classify(text.as_ref())))
        .collect();

    let total = predictions.len();
    let correct = predictions.iter().filter(|(e, p)| e == p).count();
    let neutral = predictions
        .iter()
        .filter(|(_, p)| *p == Emotion::Neutral)
        .count();

    let per_label: Vec<LabelMetrics> = Emotion::ALL
        .into_iter()
        .map(|label| {
            let tp = predictions
                .iter()
                .filter(|(e, p)| *e == label && *p == label)
                .count();
            let predicted = predictions.iter().filter(|(_, p)| *p == label).count();
            let support = predictions.iter().filter(|(e, _)| *e == label).count();

            let precision = ratio(tp, predicted);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            LabelMetrics {
                label,
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    let mut confusion = vec![vec![0; Emotion::ALL.len()]; Emotion::ALL.len()];
    for (expected, predicted) in &predictions {
        confusion[label_index(*expected)][label_index(*predicted)] += 1;
    }

    let weighted_f1 = if total == 0 {
        0.0
    } else {
        per_label
            .iter()
            .map(|m| m.f1 * m.support as f32)
            .sum::<f32>()
            / total as f32
    };

    let report = EvaluationReport {
        total,
        correct,
        accuracy: ratio(correct, total),
        per_label,
        weighted_f1,
        neutral_ratio: ratio(neutral, total),
        confusion,
    };

    info!(
        total,
        accuracy = report.accuracy,
        weighted_f1 = report.weighted_f1,
        neutral_ratio = report.neutral_ratio,
        "Evaluation finished"
    );
    report
}

/// Winning label of a set of annotator votes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vote {
    pub label: Emotion,
    pub count: usize,
    /// Percent of recognised votes that agree with the winner
    pub agreement: f32,
}

/// Majority label among `votes`; the first label seen wins ties.
///
/// Votes outside the closed set are ignored. Returns `None` when no vote is
/// recognised.
pub fn majority_vote<T: AsEmotion>(votes: &[T]) -> Option<Vote> {
    let mut counts: Vec<(Emotion, usize)> = Vec::new();
    for label in votes.iter().filter_map(AsEmotion::as_emotion) {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    let recognised: usize = counts.iter().map(|(_, count)| count).sum();
    let (label, count) = counts
        .into_iter()
        .fold(None, |best: Option<(Emotion, usize)>, (l, c)| match best {
            Some((_, bc)) if bc >= c => best,
            _ => Some((l, c)),
        })?;

    Some(Vote {
        label,
        count,
        agreement: ratio(count, recognised) * 100.0,
    })
}
