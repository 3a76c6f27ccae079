//! Text preprocessing shared by the classifier and the query parser.
//!
//! Thai is written without spaces between words, so Thai runs are segmented
//! by greedy longest matching against the crate's own vocabulary (lexicon
//! aliases, polarity markers and query keywords). Text the vocabulary does not
//! cover stays together as one token; other scripts split on whitespace and
//! punctuation and are lower-cased.

use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::emotion::lexicon;
use crate::query::patterns;

static THAI_VOCABULARY: LazyLock<AhoCorasick> = LazyLock::new(|| {
    let words: BTreeSet<&'static str> = lexicon::all_aliases()
        .chain(lexicon::POSITIVE_MARKERS.iter().copied())
        .chain(lexicon::NEGATIVE_MARKERS.iter().copied())
        .chain(patterns::vocabulary())
        .filter(|w| !w.is_ascii())
        .collect();

    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(words)
        .expect("vocabulary patterns are static literals")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Thai,
    Other,
}

fn script_of(c: char) -> Option<Script> {
    if ('\u{0E00}'..='\u{0E7F}').contains(&c) {
        Some(Script::Thai)
    } else if c.is_alphanumeric() {
        Some(Script::Other)
    } else {
        None
    }
}

/// Split text into word tokens.
///
/// # Example
///
/// ```
/// use lyric_mood::text::tokenize;
///
/// assert_eq!(tokenize("Sad, then HAPPY"), vec!["sad", "then", "happy"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut run = String::new();
    let mut run_script = None;

    for c in text.chars() {
        let script = script_of(c);
        if script != run_script {
            flush_run(&run, run_script, &mut tokens);
            run.clear();
            run_script = script;
        }
        if script.is_some() {
            run.push(c);
        }
    }
    flush_run(&run, run_script, &mut tokens);

    tokens
}

fn flush_run(run: &str, script: Option<Script>, tokens: &mut Vec<String>) {
    match script {
        _ if run.is_empty() => {}
        Some(Script::Thai) => segment_thai(run, tokens),
        Some(Script::Other) => tokens.push(run.to_lowercase()),
        None => {}
    }
}

fn segment_thai(run: &str, tokens: &mut Vec<String>) {
    let mut last = 0;
    for m in THAI_VOCABULARY.find_iter(run) {
        if m.start() > last {
            tokens.push(run[last..m.start()].to_string());
        }
        tokens.push(run[m.start()..m.end()].to_string());
        last = m.end();
    }
    if last < run.len() {
        tokens.push(run[last..].to_string());
    }
}

/// Whether the text has anything besides whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
