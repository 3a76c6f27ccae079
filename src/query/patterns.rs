//! Keyword tables used by the query parser.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::emotion::Emotion;

/// Phrases meaning "the same emotion throughout the song"
pub static CONSTANCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(คงที่|ไม่เปลี่ยนแปลง|ตลอดทั้งเพลง|throughout|consistent|stable|เหมือนเดิม|ทั้งเพลง|all the way|same emotion)",
    )
    .expect("constancy pattern is valid")
});

/// Thai filler phrases, stripped wherever they occur
pub const THAI_FILLERS: &[&str] = &[
    "เพลงที่", "ขอเพลง", "แนว", "โทน", "อารมณ์", "ช่วง", "หา", "มี",
];

/// English filler words, stripped only as whole words
pub const ENGLISH_FILLERS: &[&str] = &[
    "looking for", "i want", "find me", "consistently", "songs", "song", "tracks", "track",
    "genre", "music", "mood", "that", "with", "the", "an", "a",
];

static FILLER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let thai = THAI_FILLERS
        .iter()
        .map(|f| regex::escape(f))
        .collect::<Vec<_>>()
        .join("|");
    let english = ENGLISH_FILLERS
        .iter()
        .map(|f| regex::escape(f).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)(?:{thai})|\b(?:{english})\b")).expect("filler pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Remove filler phrases and collapse whitespace.
pub fn strip_fillers(text: &str) -> String {
    let stripped = FILLER_PATTERN.replace_all(text, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Words carrying no emotion in a constancy query
pub const STOP_WORDS: &[&str] = &[
    "เพลง", "ที่", "อารมณ์", "หา", "มี", "ตลอด", "ทั้ง", "ไม่", "เปลี่ยนแปลง", "คงที่", "เป็น",
    "จาก",
];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// How an emotional arc is described to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Start,
    GradualChange,
    SuddenChange,
    Transition,
    Uplifting,
    End,
}

impl TransitionKind {
    /// Whether a single emotion plus this cue implies a second emotion
    pub fn implies_change(self) -> bool {
        matches!(
            self,
            TransitionKind::GradualChange | TransitionKind::SuddenChange | TransitionKind::Uplifting
        )
    }
}

/// Transition cues, checked in table order
pub const TRANSITION_KEYWORDS: &[(TransitionKind, &[&str])] = &[
    (
        TransitionKind::Start,
        &["เริ่ม", "ตอนแรก", "แรกๆ", "ช่วงแรก", "ก่อน", "starts", "begins", "initially"],
    ),
    (
        TransitionKind::GradualChange,
        &["ค่อยๆ", "ค่อย", "ค่อยเป็นค่อยไป", "ช้าๆ", "gradually", "slowly", "gently"],
    ),
    (
        TransitionKind::SuddenChange,
        &[
            "พุ่ง", "กระแส", "ฉับพลัน", "ทันที", "เดี๋ยวเดียว", "suddenly", "quickly", "spikes",
            "bursts",
        ],
    ),
    (
        TransitionKind::Transition,
        &[
            "แล้ว", "จากนั้น", "ต่อมา", "เปลี่ยน", "กลาย", "then", "becomes", "changes",
            "transforms",
        ],
    ),
    (
        TransitionKind::Uplifting,
        &[
            "ขึ้น", "สู่", "เปล่งประกาย", "สดใส", "โปร่ง", "bright", "uplifting", "rising",
            "soaring",
        ],
    ),
    (
        TransitionKind::End,
        &["สุดท้าย", "ตอนจบ", "ท้ายเพลง", "จบ", "ends", "finally", "eventually"],
    ),
];

/// Thai keywords match inside a token, English keywords only as the whole token.
fn keyword_matches(token: &str, keyword: &str) -> bool {
    if keyword.is_ascii() {
        token.eq_ignore_ascii_case(keyword)
    } else {
        token.contains(keyword)
    }
}

/// First transition category whose keyword occurs in `token`.
pub fn transition_of(token: &str) -> Option<TransitionKind> {
    TRANSITION_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| keyword_matches(token, w)))
        .map(|(kind, _)| *kind)
}

/// Extra wording that signals an emotion in queries but is not a lexicon alias
pub const EMOTION_SYNONYMS: &[(Emotion, &[&str])] = &[
    (Emotion::Sad, &["เศร้าโศก", "โศก", "หม่น", "หมอง", "หดหู่"]),
    (Emotion::Hope, &["หวังใจ", "hopeful", "hoping"]),
    (Emotion::Calm, &["โทนใจเย็น", "ใจเย็น", "ผ่อนคลาย", "ชิล", "peaceful", "relaxed"]),
    (
        Emotion::Excited,
        &["เปล่งประกาย", "ประกาย", "พีค", "เข้มข้น", "exciting", "thrilling"],
    ),
    (Emotion::Happy, &["ร่าเริง", "สนุก", "ยิ้ม", "joyful", "cheerful"]),
    (Emotion::Angry, &["เดือด", "แค้น", "เคือง", "furious", "rage"]),
    (Emotion::Lonely, &["หงอย", "โดดเดี่ยว", "alone", "loneliness"]),
    (Emotion::Neutral, &["กลาง", "ธรรมดา", "ordinary"]),
];

/// First synonym entry contained in `token`.
pub fn synonym_of(token: &str) -> Option<Emotion> {
    EMOTION_SYNONYMS
        .iter()
        .find(|(_, words)| words.iter().any(|w| keyword_matches(token, w)))
        .map(|(emotion, _)| *emotion)
}

/// Second emotion guessed when a query names one emotion and a change cue.
///
/// Only these pairs are known; other emotions stay single.
pub const TRANSITION_EXPANSIONS: &[(Emotion, [Emotion; 2])] = &[
    (Emotion::Sad, [Emotion::Sad, Emotion::Hope]),
    (Emotion::Calm, [Emotion::Calm, Emotion::Excited]),
    (Emotion::Excited, [Emotion::Calm, Emotion::Excited]),
];

pub fn expand_transition(emotion: Emotion) -> Option<[Emotion; 2]> {
    TRANSITION_EXPANSIONS
        .iter()
        .find(|(base, _)| *base == emotion)
        .map(|(_, pair)| *pair)
}

/// Thai vocabulary known to the query tables, for the tokenizer
pub fn vocabulary() -> impl Iterator<Item = &'static str> {
    THAI_FILLERS
        .iter()
        .chain(STOP_WORDS)
        .copied()
        .chain(TRANSITION_KEYWORDS.iter().flat_map(|(_, w)| w.iter().copied()))
        .chain(EMOTION_SYNONYMS.iter().flat_map(|(_, w)| w.iter().copied()))
        .chain([
            "คงที่", "ไม่เปลี่ยนแปลง", "ตลอดทั้งเพลง", "เหมือนเดิม", "ทั้งเพลง",
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constancy_pattern() {
        assert!(CONSTANCY_PATTERN.is_match("เพลงที่มีความสุขตลอดทั้งเพลง"));
        assert!(CONSTANCY_PATTERN.is_match("Calm ALL THE WAY"));
        assert!(CONSTANCY_PATTERN.is_match("consistently sad"));
        assert!(!CONSTANCY_PATTERN.is_match("sad then happy"));
    }

    #[test]
    fn test_strip_fillers_thai() {
        assert_eq!(strip_fillers("ขอเพลงแนวสงบ"), "สงบ");
        assert_eq!(strip_fillers("เพลงที่โทนใจเย็น"), "ใจเย็น");
    }

    #[test]
    fn test_strip_fillers_english_whole_words_only() {
        assert_eq!(strip_fillers("Looking for a  song"), "");
        // letters inside words are kept
        assert_eq!(strip_fillers("a peaceful track"), "peaceful");
    }

    #[test]
    fn test_transition_of() {
        assert_eq!(transition_of("ค่อยๆ"), Some(TransitionKind::GradualChange));
        assert_eq!(transition_of("พุ่ง"), Some(TransitionKind::SuddenChange));
        assert_eq!(transition_of("gradually"), Some(TransitionKind::GradualChange));
        assert_eq!(transition_of("เปล่งประกาย"), Some(TransitionKind::Uplifting));
        assert_eq!(transition_of("เศร้า"), None);
    }

    #[test]
    fn test_implies_change() {
        assert!(TransitionKind::Uplifting.implies_change());
        assert!(!TransitionKind::Start.implies_change());
        assert!(!TransitionKind::Transition.implies_change());
    }

    #[test]
    fn test_synonym_of() {
        assert_eq!(synonym_of("เปล่งประกาย"), Some(Emotion::Excited));
        assert_eq!(synonym_of("hopeful"), Some(Emotion::Hope));
        assert_eq!(synonym_of("unknown"), None);
        assert_eq!(synonym_of("courage"), None);
    }

    #[test]
    fn test_expand_transition_known_pairs_only() {
        assert_eq!(
            expand_transition(Emotion::Sad),
            Some([Emotion::Sad, Emotion::Hope])
        );
        assert_eq!(
            expand_transition(Emotion::Excited),
            Some([Emotion::Calm, Emotion::Excited])
        );
        assert_eq!(expand_transition(Emotion::Angry), None);
    }
}
