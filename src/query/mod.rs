//! Free-text emotion query parsing.
//!
//! Turns phrasing such as `"sad → hope"`, `"เพลงเศร้าตลอดทั้งเพลง"` or
//! `"เพลงที่เริ่มเศร้าแล้วค่อยๆเปลี่ยนเป็นหวัง"` into an ordered sequence of
//! canonical labels. An empty sequence means the query puts no constraint on
//! the trajectory.

pub mod patterns;

use tracing::debug;

use crate::emotion::{canonicalize, lexicon, Emotion};
use crate::text::tokenize;

use patterns::{TransitionKind, CONSTANCY_PATTERN};

/// How many times a label is repeated to express "constant throughout"
pub const CONSTANT_INTENT_REPEAT: usize = 3;

/// Upper bound on emotions collected from a complex query
const MAX_COMPLEX_EMOTIONS: usize = 3;

/// Upper bound on emotions recovered by the last-resort word scan
const MAX_LOOSE_EMOTIONS: usize = 2;

/// English labels in the order embedded mentions are searched for
const EMBEDDED_SCAN_ORDER: [Emotion; 8] = [
    Emotion::Neutral,
    Emotion::Sad,
    Emotion::Happy,
    Emotion::Excited,
    Emotion::Calm,
    Emotion::Angry,
    Emotion::Lonely,
    Emotion::Hope,
];

/// Parse a free-text query into an ordered emotion sequence.
///
/// Rules are tried in order and the first that applies wins: arrow notation,
/// constancy phrasing, bare English label, embedded English label, then the
/// keyword-driven complex parser.
pub fn parse(query: &str) -> Vec<Emotion> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    if query.contains('→') || query.contains("->") {
        let sequence = parse_arrows(query);
        debug!(?sequence, "Parsed arrow query");
        return sequence;
    }

    if CONSTANCY_PATTERN.is_match(query) {
        if let Some(emotion) = first_constant_emotion(query) {
            debug!(%emotion, "Parsed constant-emotion query");
            return vec![emotion; CONSTANT_INTENT_REPEAT];
        }
    }

    let lowered = query.trim().to_lowercase();
    if let Some(emotion) = Emotion::from_english(&lowered) {
        return vec![emotion];
    }

    if let Some(emotion) = EMBEDDED_SCAN_ORDER
        .into_iter()
        .find(|e| lowered.contains(e.as_str()))
    {
        debug!(%emotion, "Found embedded label in query");
        return vec![emotion];
    }

    let sequence = parse_complex(query);
    debug!(?sequence, "Parsed complex query");
    sequence
}

fn parse_arrows(query: &str) -> Vec<Emotion> {
    query
        .replace("->", "→")
        .split('→')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| canonicalize(part).label())
        .collect()
}

fn first_constant_emotion(query: &str) -> Option<Emotion> {
    tokenize(query)
        .iter()
        .filter(|token| !patterns::is_stop_word(token))
        .find_map(|token| canonicalize(token).label())
}

fn parse_complex(query: &str) -> Vec<Emotion> {
    let stripped = patterns::strip_fillers(query);
    if stripped.is_empty() {
        return Vec::new();
    }

    let compact: String = stripped.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(emotion) = lexicon::lookup_exact(&compact) {
        return vec![emotion];
    }

    let mut found: Vec<Emotion> = Vec::new();
    let mut last_transition: Option<TransitionKind> = None;

    for token in tokenize(&stripped) {
        if let Some(kind) = patterns::transition_of(&token) {
            last_transition = Some(kind);
        }

        let emotion = canonicalize(&token)
            .label()
            .or_else(|| patterns::synonym_of(&token));
        if let Some(emotion) = emotion {
            if found.len() < MAX_COMPLEX_EMOTIONS && !found.contains(&emotion) {
                found.push(emotion);
            }
        }
    }

    match found.as_slice() {
        // A keyword overlapping the start of an alias can hide it from the
        // token scan; whole words still see it.
        [] => stripped
            .split_whitespace()
            .filter_map(|word| canonicalize(word).label())
            .take(MAX_LOOSE_EMOTIONS)
            .collect(),
        [single] => {
            let expansion = last_transition
                .filter(|kind| kind.implies_change())
                .and_then(|_| patterns::expand_transition(*single));
            match expansion {
                Some(pair) => pair.to_vec(),
                None => vec![*single],
            }
        }
        _ => found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Emotion::*;

    #[test]
    fn test_empty_query() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn test_arrow_notation() {
        assert_eq!(parse("neutral → excited → sad"), vec![Neutral, Excited, Sad]);
    }

    #[test]
    fn test_ascii_arrow_and_thai_parts() {
        assert_eq!(parse("เศร้า -> หวัง -> เศร้า"), vec![Sad, Hope, Sad]);
    }

    #[test]
    fn test_arrow_drops_unrecognized_parts() {
        assert_eq!(parse("sad → ??? → → happy"), vec![Sad, Happy]);
    }

    #[test]
    fn test_constancy_thai() {
        let parsed = parse("เพลงที่มีความสุขตลอดทั้งเพลง");
        assert_eq!(parsed.len(), CONSTANT_INTENT_REPEAT);
        assert!(parsed.iter().all(|e| Some(*e) == canonicalize("สุข").label()));
    }

    #[test]
    fn test_constancy_english() {
        assert_eq!(parse("calm throughout"), vec![Calm, Calm, Calm]);
        assert_eq!(parse("Neutral all the way"), vec![Neutral; 3]);
    }

    #[test]
    fn test_constancy_without_emotion_falls_through() {
        assert!(parse("stable").is_empty());
    }

    #[test]
    fn test_bare_label() {
        assert_eq!(parse("  Lonely "), vec![Lonely]);
    }

    #[test]
    fn test_embedded_label() {
        assert_eq!(parse("something happy please"), vec![Happy]);
    }

    #[test]
    fn test_complex_single_alias_after_fillers() {
        assert_eq!(parse("ขอเพลงแนวสงบ"), vec![Calm]);
    }

    #[test]
    fn test_complex_two_emotions() {
        assert_eq!(
            parse("เพลงที่เริ่มเศร้าแล้วค่อยๆเปลี่ยนเป็นหวัง"),
            vec![Sad, Hope]
        );
    }

    #[test]
    fn test_complex_calm_then_sparkling() {
        assert_eq!(
            parse("เพลงที่โทนใจเย็นก่อนแล้วพุ่งขึ้นมาเปล่งประกาย"),
            vec![Calm, Excited]
        );
    }

    #[test]
    fn test_complex_single_with_change_cue_expands() {
        assert_eq!(parse("เศร้า ค่อยๆ"), vec![Sad, Hope]);
    }

    #[test]
    fn test_complex_single_without_change_cue() {
        assert_eq!(parse("โกรธ ค่อยๆ"), vec![Angry]);
        assert_eq!(parse("แล้ว เหงา"), vec![Lonely]);
    }

    #[test]
    fn test_complex_caps_at_three() {
        assert_eq!(parse("เศร้า เหงา หวัง โกรธ"), vec![Sad, Lonely, Hope]);
    }

    #[test]
    fn test_complex_repeats_do_not_crowd_out_later_emotion() {
        assert_eq!(parse("โกรธ โมโห เดือด แล้ว สงบ"), vec![Angry, Calm]);
        assert_eq!(
            parse("เพลงที่เศร้าเสียใจร้องไห้แล้วกลายเป็นมีความสุข"),
            vec![Sad, Happy]
        );
    }

    #[test]
    fn test_complex_falls_back_to_whole_words() {
        // "กระแส" swallows the first letter of the alias it precedes
        assert_eq!(parse("กระแสงบ"), vec![Calm]);
        assert_eq!(parse("กระแสงบ กระแสุข กระแสงบ"), vec![Calm, Happy]);
    }

    #[test]
    fn test_unparseable_query() {
        assert!(parse("asdf qwerty").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let query = "เพลงที่เริ่มเศร้าแล้วค่อยๆเปลี่ยนเป็นหวัง";
        assert_eq!(parse(query), parse(query));
    }
}
