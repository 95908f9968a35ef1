//! Line cleanup and noise detection

use crate::script::{self, CharacterClassifier};
use unicode_normalization::UnicodeNormalization;

/// Box glyphs used as checkbox bullets in the source workbooks
const BOX_GLYPHS: [char; 3] = ['□', '■', '☐'];

/// Section and page markers. Also real words, so only a standalone marker is a header.
const HEADER_MARKERS: [&str; 4] = ["まとめ", "文法", "ページ", "Page"];

/// NFC-normalize, drop box glyphs, collapse whitespace and trim
pub fn normalize_line(raw: &str) -> String {
    let composed: String = raw
        .nfc()
        .filter(|c| !BOX_GLYPHS.contains(c))
        .collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Section headers, page numbers and bare markers.
///
/// Expects text already passed through [`normalize_line`] or at least trimmed.
pub fn is_noise(text: &str) -> bool {
    is_layout_noise(text) || is_section_header(text.trim())
}

/// Page numbers, box glyphs and `PART` markers.
///
/// Matches no vocabulary, so the clusterer applies it to single fragments.
pub fn is_layout_noise(text: &str) -> bool {
    let text = text.trim();
    text.is_empty()
        || script::is_digits(text)
        || text.chars().all(|c| BOX_GLYPHS.contains(&c))
        || is_part_marker(text)
}

/// `まとめ`, `文法 2`, `Page 3`, but not `まとめる` or `文法 ぶんぽう ngữ pháp`
fn is_section_header(text: &str) -> bool {
    HEADER_MARKERS.iter().any(|marker| {
        text.strip_prefix(marker).is_some_and(|rest| {
            let standalone = rest.chars().next().map_or(true, |c| {
                c.is_whitespace() || c.is_ascii_digit() || script::CLASSIFIER.is_enumerator(c)
            });
            standalone && !script::contains_hiragana(rest) && !script::contains_latin(rest)
        })
    })
}

/// `PART 1`, `PART①`, `PART 12 まとめ`
fn is_part_marker(text: &str) -> bool {
    text.strip_prefix("PART")
        .map(|rest| {
            rest.trim_start().chars().next().is_some_and(|c| {
                c.is_ascii_digit() || script::CLASSIFIER.is_enumerator(c)
            })
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_line("  注意\u{3000}ちゅうい \t chú ý  "), "注意 ちゅうい chú ý");
    }

    #[test]
    fn test_normalize_strips_box_glyphs() {
        assert_eq!(normalize_line("□ 注意 ちゅうい chú ý"), "注意 ちゅうい chú ý");
        assert_eq!(normalize_line("□ PART 1 まとめ"), "PART 1 まとめ");
    }

    #[test]
    fn test_normalize_composes_diacritics() {
        // "ý" as y + combining acute
        assert_eq!(normalize_line("chu\u{0301} y\u{0301}"), "chú ý");
    }

    #[test]
    fn test_noise() {
        assert!(is_noise(""));
        assert!(is_noise("12"));
        assert!(is_noise("□□"));
        assert!(is_noise("PART 1 まとめ"));
        assert!(is_noise("PART③"));
        assert!(is_noise("まとめ"));
        assert!(is_noise("文法 1"));
        assert!(is_noise("Page 3"));
    }

    #[test]
    fn test_not_noise() {
        assert!(!is_noise("注意 ちゅうい chú ý"));
        assert!(!is_noise("PARTY"));
        assert!(!is_noise("決意"));
    }

    #[test]
    fn test_words_starting_with_markers_are_not_noise() {
        assert!(!is_noise("まとめる tổng kết"));
        assert!(!is_noise("まとめる まとめる tổng kết"));
        assert!(!is_noise("文法 ぶんぽう ngữ pháp"));
        assert!(!is_noise("ページ trang"));
        assert!(!is_noise("Pages"));
    }

    #[test]
    fn test_standalone_markers_are_noise() {
        assert!(is_noise("まとめ ①"));
        assert!(is_noise("文法"));
        assert!(is_noise("ページ 12"));
    }

    #[test]
    fn test_layout_noise_keeps_marker_words() {
        assert!(is_layout_noise("PART 1"));
        assert!(is_layout_noise("□"));
        assert!(is_layout_noise("12"));
        assert!(!is_layout_noise("文法"));
        assert!(!is_layout_noise("まとめ"));
    }
}
