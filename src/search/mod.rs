//! Matching query sequences against song trajectories.
//!
//! Two comparisons are offered: an order-preserving, gap-tolerant
//! containment test, and an LCS similarity in `[0, 1]` for ranked retrieval.

use serde::Serialize;
use tracing::debug;

use crate::emotion::{AsEmotion, Emotion};
use crate::query;
use crate::types::Song;

/// True when `target` appears in `sequence` in order, gaps allowed.
///
/// A target made of one repeated label only requires that label to occur
/// once, whatever the repeat count. An empty target matches everything.
/// Unknown elements on either side never match.
pub fn soft_subsequence_match<T, S>(target: &[T], sequence: &[S]) -> bool
where
    T: AsEmotion,
    S: AsEmotion,
{
    let Some(target) = target
        .iter()
        .map(AsEmotion::as_emotion)
        .collect::<Option<Vec<Emotion>>>()
    else {
        return false;
    };
    let Some(&first) = target.first() else {
        return true;
    };

    if target.iter().all(|t| *t == first) {
        return sequence.iter().any(|s| s.as_emotion() == Some(first));
    }

    let mut next = 0;
    for item in sequence {
        if item.as_emotion() == Some(target[next]) {
            next += 1;
            if next == target.len() {
                return true;
            }
        }
    }
    false
}

/// Longest common subsequence length over the longer sequence's length.
///
/// Identical non-empty sequences score 1.0; two empty sequences score 0.0.
pub fn similarity_score<Q, C>(query: &[Q], candidate: &[C]) -> f32
where
    Q: AsEmotion,
    C: AsEmotion,
{
    let longest = query.len().max(candidate.len());
    if longest == 0 {
        return 0.0;
    }

    let query: Vec<Option<Emotion>> = query.iter().map(AsEmotion::as_emotion).collect();
    let candidate: Vec<Option<Emotion>> = candidate.iter().map(AsEmotion::as_emotion).collect();

    // Single rolling row of the DP table
    let mut row = vec![0usize; candidate.len() + 1];
    for q in &query {
        let mut diagonal = 0;
        for (j, c) in candidate.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if q.is_some() && q == c {
                diagonal + 1
            } else {
                above.max(row[j]).max(diagonal)
            };
            diagonal = above;
        }
    }

    row[candidate.len()] as f32 / longest as f32
}

/// A song whose trajectory contains the query
#[derive(Debug, Clone, Serialize)]
pub struct SongMatch<'a> {
    pub song: &'a Song,
}

/// A song scored against the query
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch<'a> {
    pub song: &'a Song,
    pub score: f32,
}

/// Songs whose trajectory soft-matches the parsed query.
pub fn search_matches<'a>(query_text: &str, songs: &'a [Song]) -> Vec<SongMatch<'a>> {
    search_matches_sequence(&query::parse(query_text), songs)
}

/// Songs whose trajectory soft-matches `target`, in library order.
pub fn search_matches_sequence<'a, T: AsEmotion>(
    target: &[T],
    songs: &'a [Song],
) -> Vec<SongMatch<'a>> {
    let matches: Vec<SongMatch<'a>> = songs
        .iter()
        .filter(|song| soft_subsequence_match(target, &song.trajectory()))
        .map(|song| SongMatch { song })
        .collect();

    debug!(
        query_len = target.len(),
        songs = songs.len(),
        matched = matches.len(),
        "Soft match search complete"
    );
    matches
}

/// Songs scoring at least `threshold` against the parsed query.
pub fn search_ranked<'a>(
    query_text: &str,
    songs: &'a [Song],
    threshold: f32,
) -> Vec<RankedMatch<'a>> {
    search_ranked_sequence(&query::parse(query_text), songs, threshold)
}

/// Songs scoring at least `threshold` against `target`, best first.
///
/// Songs with equal scores keep their library order.
pub fn search_ranked_sequence<'a, T: AsEmotion>(
    target: &[T],
    songs: &'a [Song],
    threshold: f32,
) -> Vec<RankedMatch<'a>> {
    let mut ranked: Vec<RankedMatch<'a>> = songs
        .iter()
        .map(|song| RankedMatch {
            song,
            score: similarity_score(target, &song.trajectory()),
        })
        .filter(|m| m.score >= threshold)
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        query_len = target.len(),
        threshold,
        songs = songs.len(),
        matched = ranked.len(),
        "Ranked search complete"
    );
    ranked
}
