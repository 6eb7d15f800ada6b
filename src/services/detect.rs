//! Lightweight language detection for catalog text.
//!
//! Catalog metadata rarely states its own language, so the English-only
//! filter works from the text itself: script analysis first (non-Latin
//! scripts settle the question immediately), then high-frequency marker
//! words for Latin-script text. No external service, no model files.

/// Share of non-Latin letters above which text is treated as non-English.
const NON_LATIN_THRESHOLD: f64 = 0.3;

/// High-frequency English function words.
const ENGLISH_MARKERS: &[&str] = &[
    "the", "and", "of", "to", "is", "are", "was", "were", "with", "from",
    "this", "that", "for", "but", "not", "have", "has", "had", "will",
    "would", "can", "could", "should", "it", "they", "we", "you", "he",
    "she", "his", "her", "by",
];

/// Function words common in the Latin-script languages the catalog
/// returns most often (Spanish, French, German, Italian, Portuguese).
const FOREIGN_MARKERS: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "du", "et", "est", "dans",
    "pour", "que", "qui", "el", "los", "las", "una", "del", "por", "para",
    "con", "es", "de", "der", "die", "das", "und", "ist", "von", "im",
    "ein", "eine", "il", "di", "che", "non", "per",
];

/// Characters that essentially never occur in English prose.
const FOREIGN_DIACRITICS: &[char] = &[
    'à', 'â', 'ä', 'æ', 'ç', 'é', 'è', 'ê', 'ë', 'î', 'ï', 'ô', 'ö', 'œ',
    'ù', 'û', 'ü', 'ñ', 'á', 'í', 'ó', 'ú', 'ì', 'ò', 'ß', '¿', '¡',
];

/// Verdict for one piece of text.
///
/// Three-valued on purpose: `Undetermined` lets callers pick a policy for
/// text with no usable signal instead of having the detector guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    English,
    NotEnglish,
    Undetermined,
}

fn is_latin(c: char) -> bool {
    // Basic Latin through Latin Extended-B
    (c as u32) < 0x250
}

/// Classify a piece of text.
///
/// Rules, in order:
/// 1. No alphabetic characters at all: `Undetermined`.
/// 2. More than [`NON_LATIN_THRESHOLD`] of the letters outside the Latin
///    blocks: `NotEnglish`.
/// 3. Otherwise score marker words. Foreign markers outnumbering English
///    ones, or foreign diacritics with no English markers at all, reads
///    as `NotEnglish`; everything else as `English`. A plain-ASCII title
///    with no markers on either side ("Dune") lands on `English`.
pub fn classify(text: &str) -> Detection {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return Detection::Undetermined;
    }

    let non_latin = letters.iter().filter(|c| !is_latin(**c)).count();
    if non_latin as f64 / letters.len() as f64 > NON_LATIN_THRESHOLD {
        return Detection::NotEnglish;
    }

    let lowered = text.to_lowercase();
    let mut english_hits = 0usize;
    let mut foreign_hits = 0usize;
    for word in lowered.split(|c: char| !c.is_alphabetic()) {
        if word.is_empty() {
            continue;
        }
        if ENGLISH_MARKERS.contains(&word) {
            english_hits += 1;
        }
        if FOREIGN_MARKERS.contains(&word) {
            foreign_hits += 1;
        }
    }

    let has_diacritics = lowered.chars().any(|c| FOREIGN_DIACRITICS.contains(&c));

    if foreign_hits > english_hits {
        return Detection::NotEnglish;
    }
    if has_diacritics && english_hits == 0 {
        return Detection::NotEnglish;
    }

    Detection::English
}

/// Strict check used by the English-only result filter.
///
/// Only a positive `English` verdict passes; `Undetermined` text is
/// dropped rather than waved through.
pub fn is_english(text: &str) -> bool {
    classify(text) == Detection::English
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_undetermined() {
        assert_eq!(classify(""), Detection::Undetermined);
        assert_eq!(classify("   "), Detection::Undetermined);
    }

    #[test]
    fn test_numeric_title_is_undetermined() {
        assert_eq!(classify("1984"), Detection::Undetermined);
        assert_eq!(classify("11/22/63"), Detection::Undetermined);
    }

    #[test]
    fn test_plain_ascii_title_reads_as_english() {
        assert_eq!(classify("Dune"), Detection::English);
        assert_eq!(classify("Foundation"), Detection::English);
    }

    #[test]
    fn test_english_description() {
        let text = "A young boy discovers that he is a wizard and leaves \
                    for a school of magic.";
        assert_eq!(classify(text), Detection::English);
    }

    #[test]
    fn test_devanagari_is_not_english() {
        assert_eq!(classify("एक प्रेम कहानी"), Detection::NotEnglish);
    }

    #[test]
    fn test_cyrillic_is_not_english() {
        assert_eq!(classify("Война и мир"), Detection::NotEnglish);
    }

    #[test]
    fn test_spanish_description_is_not_english() {
        let text = "Una novela sobre la vida de una familia en el pueblo \
                    de Macondo.";
        assert_eq!(classify(text), Detection::NotEnglish);
    }

    #[test]
    fn test_french_title_with_diacritics_is_not_english() {
        assert_eq!(classify("L'étranger"), Detection::NotEnglish);
    }

    #[test]
    fn test_placeholder_description_counts_as_english() {
        assert_eq!(classify("No description available."), Detection::English);
    }

    #[test]
    fn test_is_english_fails_closed() {
        assert!(!is_english(""));
        assert!(!is_english("1984"));
        assert!(is_english("The name of the wind"));
    }
}
