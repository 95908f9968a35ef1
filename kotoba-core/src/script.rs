//! Character classification for mixed Japanese / Latin study material
//!
//! Vocabulary lines scraped from PDF text layers mix kanji, hiragana and a
//! Latin-script gloss (Vietnamese or English). Every heuristic in the
//! extractor is phrased in terms of these classes.

/// Script class of a single character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// CJK unified ideograph (U+4E00..=U+9FAF) or the iteration mark 々
    Kanji,
    /// Hiragana (U+3041..=U+3096) or the prolonged sound mark ー
    Hiragana,
    /// Katakana (U+30A1..=U+30FA)
    Katakana,
    /// Latin letter, including Vietnamese diacritics, or a combining mark
    Latin,
    /// ASCII or full-width digit
    Digit,
    /// Whitespace, including the ideographic space U+3000
    Whitespace,
    /// Circled enumerator glyph (①..⑳)
    Enumerator,
    /// Anything else
    Other,
}

/// Pure character classification logic
pub trait CharacterClassifier: Send + Sync {
    /// Classify a character
    fn classify(&self, ch: char) -> CharClass;

    /// Check if character is kanji
    fn is_kanji(&self, ch: char) -> bool {
        matches!(self.classify(ch), CharClass::Kanji)
    }

    /// Check if character is hiragana
    fn is_hiragana(&self, ch: char) -> bool {
        matches!(self.classify(ch), CharClass::Hiragana)
    }

    /// Check if character belongs to the target-language (Latin) script
    fn is_latin(&self, ch: char) -> bool {
        matches!(self.classify(ch), CharClass::Latin)
    }

    /// Check if character is an enumerator glyph
    fn is_enumerator(&self, ch: char) -> bool {
        matches!(self.classify(ch), CharClass::Enumerator)
    }
}

/// Classifier for Japanese study material glossed in a Latin-script language
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseClassifier;

impl CharacterClassifier for JapaneseClassifier {
    fn classify(&self, ch: char) -> CharClass {
        match ch {
            '\u{4E00}'..='\u{9FAF}' | '々' => CharClass::Kanji,
            '\u{3041}'..='\u{3096}' | 'ー' => CharClass::Hiragana,
            '\u{30A1}'..='\u{30FA}' => CharClass::Katakana,
            '①'..='⑳' => CharClass::Enumerator,
            '0'..='9' | '０'..='９' => CharClass::Digit,
            c if c.is_whitespace() => CharClass::Whitespace,
            // Combining diacritics show up when the text layer is decomposed
            '\u{0300}'..='\u{036F}' => CharClass::Latin,
            c if c.is_alphabetic() && is_latin_block(c) => CharClass::Latin,
            _ => CharClass::Other,
        }
    }
}

fn is_latin_block(ch: char) -> bool {
    matches!(ch as u32, 0x0041..=0x024F | 0x1E00..=0x1EFF)
}

/// Shared classifier instance
pub const CLASSIFIER: JapaneseClassifier = JapaneseClassifier;

/// Check if character is kanji
pub fn is_kanji(ch: char) -> bool {
    CLASSIFIER.is_kanji(ch)
}

/// Check if character is hiragana
pub fn is_hiragana(ch: char) -> bool {
    CLASSIFIER.is_hiragana(ch)
}

/// Check if character is a target-language letter
pub fn is_latin(ch: char) -> bool {
    CLASSIFIER.is_latin(ch)
}

/// True when `s` is non-empty and consists only of kanji
pub fn is_kanji_run(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_kanji)
}

/// True when `s` is non-empty and consists only of hiragana
pub fn is_hiragana_run(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_hiragana)
}

/// True when `s` contains at least one hiragana character
pub fn contains_hiragana(s: &str) -> bool {
    s.chars().any(is_hiragana)
}

/// True when `s` contains at least one target-language letter
pub fn contains_latin(s: &str) -> bool {
    s.chars().any(|c| is_latin(c) && c.is_alphabetic())
}

/// True when `s` is non-empty and holds nothing but digits
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| CLASSIFIER.classify(c) == CharClass::Digit)
}

/// Longest contiguous run of characters of the given class.
///
/// Ties keep the earliest run. Returns an empty slice when no character of
/// the class is present.
pub fn longest_run(s: &str, class: CharClass) -> &str {
    let mut best = (0, 0);
    let mut start: Option<usize> = None;

    for (idx, ch) in s.char_indices() {
        if CLASSIFIER.classify(ch) == class {
            start.get_or_insert(idx);
        } else if let Some(begin) = start.take() {
            if idx - begin > best.1 - best.0 {
                best = (begin, idx);
            }
        }
    }
    if let Some(begin) = start {
        if s.len() - begin > best.1 - best.0 {
            best = (begin, s.len());
        }
    }

    &s[best.0..best.1]
}
