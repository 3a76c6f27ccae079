//! Deterministic fallbacks used when the backend is not confident.

use crate::emotion::{canonicalize, lexicon, Emotion};

/// First token that resolves to a canonical label.
pub fn lexicon_match<S: AsRef<str>>(tokens: &[S]) -> Option<Emotion> {
    tokens
        .iter()
        .find_map(|token| canonicalize(token.as_ref()).label())
}

/// Positive vs negative marker balance.
///
/// Strictly more positive markers gives `happy`, strictly more negative gives
/// `sad`, a tie gives nothing.
pub fn polarity<S: AsRef<str>>(tokens: &[S]) -> Option<Emotion> {
    let (positive, negative) = tokens.iter().fold((0usize, 0usize), |(pos, neg), token| {
        let token = token.as_ref();
        (
            pos + usize::from(lexicon::is_positive_marker(token)),
            neg + usize::from(lexicon::is_negative_marker(token)),
        )
    });

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Some(Emotion::Happy),
        std::cmp::Ordering::Less => Some(Emotion::Sad),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;

    #[test]
    fn test_lexicon_match_first_token_wins() {
        let tokens = tokenize("วันนี้ เหงา แต่ ก็ ยิ้ม");
        assert_eq!(lexicon_match(&tokens), Some(Emotion::Lonely));
    }

    #[test]
    fn test_lexicon_match_english_label() {
        assert_eq!(lexicon_match(&["so", "angry"]), Some(Emotion::Angry));
    }

    #[test]
    fn test_lexicon_match_none() {
        assert_eq!(lexicon_match(&["nothing", "here"]), None);
        assert_eq!(lexicon_match::<&str>(&[]), None);
    }

    #[test]
    fn test_polarity() {
        assert_eq!(polarity(&["love", "love", "tears"]), Some(Emotion::Happy));
        assert_eq!(polarity(&["pain", "tears", "good"]), Some(Emotion::Sad));
        assert_eq!(polarity(&["love", "tears"]), None);
        assert_eq!(polarity(&["neither"]), None);
    }

    #[test]
    fn test_polarity_thai_markers() {
        let tokens = tokenize("น้ำตาไหลเจ็บ");
        assert_eq!(polarity(&tokens), Some(Emotion::Sad));
    }
}
