//! Labelling a song's segments.
//!
//! Segmentation happens upstream; this turns the ordered text chunks into
//! labelled [`Segment`]s, in parallel when the `parallel` feature is on.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, info_span};

use crate::classifier::EmotionClassifier;
use crate::config::PipelineConfig;
use crate::types::{Segment, Song};

/// Classify up to `max_segments` texts and return them as dense segments.
///
/// Output order always follows input order, whether or not the work ran in
/// parallel.
pub fn analyze_segments<S>(
    classifier: &EmotionClassifier,
    texts: &[S],
    config: &PipelineConfig,
) -> Vec<Segment>
where
    S: AsRef<str> + Sync,
{
    let span = info_span!("analyze_segments", segments = texts.len());
    let _guard = span.enter();

    let kept = texts.len().min(config.max_segments);
    if kept < texts.len() {
        debug!(
            dropped = texts.len() - kept,
            max_segments = config.max_segments,
            "Segment cap reached"
        );
    }
    let texts = &texts[..kept];

    let start = Instant::now();
    let label = |(position, text): (usize, &S)| {
        let text = text.as_ref();
        Segment::new(position, text, Some(classifier.classify(text)))
    };

    #[cfg(feature = "parallel")]
    let segments: Vec<Segment> = if config.parallel {
        texts.par_iter().enumerate().map(label).collect()
    } else {
        texts.iter().enumerate().map(label).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let segments: Vec<Segment> = texts.iter().enumerate().map(label).collect();

    info!(
        segments = segments.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Segments labelled"
    );
    segments
}

/// Re-run analysis over a song's own segment texts and replace its segments.
pub fn reanalyze(classifier: &EmotionClassifier, song: &mut Song, config: &PipelineConfig) {
    let texts: Vec<String> = song.segments.iter().map(|s| s.text.clone()).collect();
    let segments = analyze_segments(classifier, &texts, config);
    song.replace_segments(segments);
}
