//! Bilingual alias tables and the matchers built from them.
//!
//! The tables are plain constants; the Aho-Corasick automata and lookup maps
//! derived from them are built once on first use and shared read-only.

use aho_corasick::AhoCorasick;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::Emotion;

/// Thai words and phrases that resolve to each label.
///
/// An alias may appear under exactly one label. Each label's Thai display
/// form is listed as its own alias.
pub const THAI_ALIASES: &[(Emotion, &[&str])] = &[
    (
        Emotion::Sad,
        &[
            "เศร้า", "เสียใจ", "หม่น", "หมอง", "หดหู่", "ซึม", "ร้องไห้", "ทุกข์",
            "น้อยใจ", "ผิดหวัง", "เศร้าโศก", "โศกเศร้า",
        ],
    ),
    (
        Emotion::Lonely,
        &[
            "เหงา", "เดียวดาย", "โดดเดี่ยว", "ว้าเหว่", "หงอย", "ลำพัง", "เปล่าเปลี่ยว",
            "เศร้าเหงา",
        ],
    ),
    (
        Emotion::Hope,
        &[
            "หวัง", "ความหวัง", "มีความหวัง", "เริ่มหวัง", "หวังใจ", "ฝัน", "กำลังใจ", "สู้",
            "พยายาม",
        ],
    ),
    (
        Emotion::Happy,
        &[
            "สุข", "มีความสุข", "ร่าเริง", "สดใส", "สนุก", "แฮปปี้", "ยิ้ม", "ดีใจ", "เบิกบาน",
            "ชื่นใจ", "ยินดี",
        ],
    ),
    (
        Emotion::Excited,
        &[
            "ตื่นเต้น", "เร้าใจ", "พีค", "เข้มข้น", "ฮึกเหิม", "เร่งเร้า", "มัน", "สะใจ",
            "เปรี้ยว",
        ],
    ),
    (
        Emotion::Calm,
        &[
            "สงบ", "นิ่ง", "ใจเย็น", "เย็น", "ผ่อนคลาย", "ชิล", "สบาย", "พักผ่อน", "สงัด",
            "เยือกเย็น",
        ],
    ),
    (
        Emotion::Angry,
        &[
            "โกรธ", "โมโห", "เดือด", "เกรี้ยวกราด", "แค้น", "เคือง", "ฉุน", "เดือดดาล",
        ],
    ),
    (
        Emotion::Neutral,
        &["เฉย", "เฉยๆ", "กลางๆ", "ปกติ", "ธรรมดา", "เรื่อยๆ"],
    ),
];

/// Tokens that lean positive when no alias matched
pub const POSITIVE_MARKERS: &[&str] = &[
    "ดี", "รัก", "สวย", "หัวเราะ", "ปลื้ม", "อบอุ่น", "สว่าง", "โชคดี", "love", "good",
    "smile", "joy", "shine", "bright", "laugh", "sweet",
];

/// Tokens that lean negative when no alias matched
pub const NEGATIVE_MARKERS: &[&str] = &[
    "น้ำตา", "เจ็บ", "ปวด", "ร้าว", "แหลกสลาย", "จากไป", "ลาก่อน", "ทรมาน", "tears",
    "pain", "hurt", "cry", "broken", "lost", "goodbye",
];

struct AliasIndex {
    automaton: AhoCorasick,
    /// Label and length in chars, indexed by pattern id
    entries: Vec<(Emotion, usize)>,
    exact: HashMap<&'static str, Emotion>,
}

static ALIASES: LazyLock<AliasIndex> = LazyLock::new(|| {
    let mut patterns = Vec::new();
    let mut entries = Vec::new();
    let mut exact = HashMap::new();

    for (emotion, aliases) in THAI_ALIASES {
        for alias in *aliases {
            patterns.push(*alias);
            entries.push((*emotion, alias.chars().count()));
            exact.insert(*alias, *emotion);
        }
    }

    let automaton = AhoCorasick::new(&patterns).expect("alias patterns are static literals");

    AliasIndex {
        automaton,
        entries,
        exact,
    }
});

/// Find the longest Thai alias contained anywhere in `text`.
///
/// Ties on length go to the earliest occurrence, then to table order.
pub fn longest_alias_in(text: &str) -> Option<Emotion> {
    let index = &*ALIASES;
    index
        .automaton
        .find_overlapping_iter(text)
        .map(|m| {
            let (emotion, len) = index.entries[m.pattern().as_usize()];
            (len, m.start(), m.pattern().as_usize(), emotion)
        })
        .min_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)))
        .map(|(_, _, _, emotion)| emotion)
}

/// Whole-string lookup: a Thai alias or an English label, nothing partial.
pub fn lookup_exact(text: &str) -> Option<Emotion> {
    let text = text.trim();
    ALIASES
        .exact
        .get(text)
        .copied()
        .or_else(|| Emotion::from_english(text))
}

/// Every Thai alias, for building tokenizer vocabularies
pub fn all_aliases() -> impl Iterator<Item = &'static str> {
    THAI_ALIASES
        .iter()
        .flat_map(|(_, aliases)| aliases.iter().copied())
}

pub fn is_positive_marker(token: &str) -> bool {
    POSITIVE_MARKERS.contains(&token)
}

pub fn is_negative_marker(token: &str) -> bool {
    NEGATIVE_MARKERS.contains(&token)
}
