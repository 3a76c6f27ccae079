//! Closed emotion vocabulary and label canonicalization.
//!
//! Every label the crate emits, stores or compares is an [`Emotion`]. Raw
//! strings coming from users, models or storage are resolved through
//! [`canonicalize`] (free text, alias aware) or [`AsEmotion`] (stored labels,
//! exact bilingual forms only).

pub mod lexicon;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight canonical emotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Sad,
    Lonely,
    Hope,
    Happy,
    Excited,
    Calm,
    Angry,
    Neutral,
}

/// Error returned when parsing a string that is not a canonical English label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown emotion label: {0}")]
pub struct UnknownEmotion(pub String);

impl Emotion {
    /// All labels, in the order they are offered to a zero-shot classifier
    pub const ALL: [Emotion; 8] = [
        Emotion::Sad,
        Emotion::Lonely,
        Emotion::Hope,
        Emotion::Happy,
        Emotion::Excited,
        Emotion::Calm,
        Emotion::Angry,
        Emotion::Neutral,
    ];

    /// English form, also the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Sad => "sad",
            Emotion::Lonely => "lonely",
            Emotion::Hope => "hope",
            Emotion::Happy => "happy",
            Emotion::Excited => "excited",
            Emotion::Calm => "calm",
            Emotion::Angry => "angry",
            Emotion::Neutral => "neutral",
        }
    }

    /// Thai display form
    pub fn thai(self) -> &'static str {
        match self {
            Emotion::Sad => "เศร้า",
            Emotion::Lonely => "เหงา",
            Emotion::Hope => "หวัง",
            Emotion::Happy => "สุข",
            Emotion::Excited => "ตื่นเต้น",
            Emotion::Calm => "สงบ",
            Emotion::Angry => "โกรธ",
            Emotion::Neutral => "เฉย",
        }
    }

    /// Case-insensitive lookup of the English form.
    pub fn from_english(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(label))
    }

    /// Exact lookup of the Thai display form.
    pub fn from_thai(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|e| e.thai() == label)
    }

    /// English labels offered to the external classifier
    pub fn candidate_labels() -> [&'static str; 8] {
        Self::ALL.map(Emotion::as_str)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_english(s).ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}

/// Normalize a stored label to the closed set.
///
/// Accepts the English form in any case or the Thai display form. Anything
/// else, including blank strings, is unknown and yields `None`.
pub fn normalize_label(label: &str) -> Option<Emotion> {
    Emotion::from_english(label).or_else(|| Emotion::from_thai(label))
}

/// Anything that can be read as a (possibly unknown) canonical label.
///
/// Implemented for [`Emotion`], raw strings from storage and optional values,
/// so matchers and aggregators accept whichever shape the caller holds.
pub trait AsEmotion {
    fn as_emotion(&self) -> Option<Emotion>;
}

impl AsEmotion for Emotion {
    fn as_emotion(&self) -> Option<Emotion> {
        Some(*self)
    }
}

impl AsEmotion for str {
    fn as_emotion(&self) -> Option<Emotion> {
        normalize_label(self)
    }
}

impl AsEmotion for String {
    fn as_emotion(&self) -> Option<Emotion> {
        normalize_label(self)
    }
}

impl<T: AsEmotion> AsEmotion for Option<T> {
    fn as_emotion(&self) -> Option<Emotion> {
        self.as_ref().and_then(AsEmotion::as_emotion)
    }
}

impl<T: AsEmotion + ?Sized> AsEmotion for &T {
    fn as_emotion(&self) -> Option<Emotion> {
        (**self).as_emotion()
    }
}

/// Outcome of [`canonicalize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Canonical {
    /// Resolved to a label of the closed set
    Label(Emotion),
    /// Not recognized; carries the whitespace-stripped input
    Unrecognized(String),
    /// Blank input
    Empty,
}

impl Canonical {
    /// The resolved label, if any. Pass-throughs are discarded here.
    pub fn label(&self) -> Option<Emotion> {
        match self {
            Canonical::Label(emotion) => Some(*emotion),
            Canonical::Unrecognized(_) | Canonical::Empty => None,
        }
    }

    /// String rendering: English label, pass-through token, or `""`.
    pub fn as_str(&self) -> &str {
        match self {
            Canonical::Label(emotion) => emotion.as_str(),
            Canonical::Unrecognized(token) => token,
            Canonical::Empty => "",
        }
    }
}

/// Resolve free text to a canonical label.
///
/// Whitespace is removed, then the Thai alias table is scanned by containment
/// with the longest alias winning. Without a Thai hit the case-folded token is
/// checked against the English labels. Unmatched input is passed through as
/// [`Canonical::Unrecognized`].
pub fn canonicalize(label: &str) -> Canonical {
    let stripped: String = label.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Canonical::Empty;
    }

    if let Some(emotion) = lexicon::longest_alias_in(&stripped) {
        return Canonical::Label(emotion);
    }

    match Emotion::from_english(&stripped) {
        Some(emotion) => Canonical::Label(emotion),
        None => Canonical::Unrecognized(stripped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_thai_bijection() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_english(emotion.as_str()), Some(emotion));
            assert_eq!(Emotion::from_thai(emotion.thai()), Some(emotion));
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("HAPPY".parse::<Emotion>(), Ok(Emotion::Happy));
        assert_eq!(" calm ".parse::<Emotion>(), Ok(Emotion::Calm));
        assert!("melancholy".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Emotion::Excited).unwrap();
        assert_eq!(json, "\"excited\"");

        let decoded: Emotion = serde_json::from_str("\"lonely\"").unwrap();
        assert_eq!(decoded, Emotion::Lonely);
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("Sad"), Some(Emotion::Sad));
        assert_eq!(normalize_label("เศร้า"), Some(Emotion::Sad));
        assert_eq!(normalize_label("กังวล"), None);
        assert_eq!(normalize_label(""), None);
    }

    #[test]
    fn test_as_emotion_shapes() {
        let stored: Option<String> = Some("หวัง".to_string());
        assert_eq!(stored.as_emotion(), Some(Emotion::Hope));

        let missing: Option<String> = None;
        assert_eq!(missing.as_emotion(), None);

        assert_eq!("neutral".as_emotion(), Some(Emotion::Neutral));
        assert_eq!(Emotion::Angry.as_emotion(), Some(Emotion::Angry));
    }

    #[test]
    fn test_canonicalize_blank() {
        assert_eq!(canonicalize(""), Canonical::Empty);
        assert_eq!(canonicalize("   \t "), Canonical::Empty);
    }

    #[test]
    fn test_canonicalize_english() {
        assert_eq!(canonicalize("  Happy "), Canonical::Label(Emotion::Happy));
        assert_eq!(canonicalize("ne utral"), Canonical::Label(Emotion::Neutral));
    }

    #[test]
    fn test_canonicalize_thai_containment() {
        assert_eq!(canonicalize("มีความสุขมาก"), Canonical::Label(Emotion::Happy));
        assert_eq!(canonicalize("เศร้า"), Canonical::Label(Emotion::Sad));
        assert_eq!(canonicalize("โทนใจเย็น"), Canonical::Label(Emotion::Calm));
    }

    #[test]
    fn test_canonicalize_prefers_longest_alias() {
        // "เศร้าเหงา" holds the sad alias "เศร้า" but the longer lonely alias wins
        assert_eq!(canonicalize("เศร้าเหงา"), Canonical::Label(Emotion::Lonely));
    }

    #[test]
    fn test_canonicalize_pass_through() {
        assert_eq!(
            canonicalize(" some thing "),
            Canonical::Unrecognized("something".to_string())
        );
        assert_eq!(canonicalize("กังวล").label(), None);
    }

    #[test]
    fn test_canonicalize_idempotent() {
        let inputs = [
            "happy",
            "มีความสุขมาก",
            "เศร้าเหงา",
            "พุ่งขึ้น",
            "hello world",
            "  CALM ",
            "ความหวัง",
            "xyz",
        ];
        for input in inputs {
            let once = canonicalize(input);
            let twice = canonicalize(once.as_str());
            assert_eq!(once.as_str(), twice.as_str(), "input {input:?}");
        }
    }
}
